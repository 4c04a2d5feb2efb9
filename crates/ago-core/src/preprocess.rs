use unicode_normalization::UnicodeNormalization;

/// Characters dropped from a token before it becomes an index key
pub const STRIPPED_PUNCTUATION: &[char] = &[',', '.', '!', '?', '`', '\'', '"', ':', '(', ')'];

pub trait Preprocessor {
    /// Turn a raw token into its index key: NFKC, lowercase, punctuation removed.
    /// May return an empty string, which callers treat as "no word".
    fn normalize(&self, token: &str) -> String {
        let folded: String = token.nfkc().collect::<String>().to_lowercase();
        folded.replace(STRIPPED_PUNCTUATION, "")
    }

    /// Split text into raw tokens
    fn tokens<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        text.split_whitespace()
    }
}

pub struct WordPreprocessor;
impl Preprocessor for WordPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_punctuation() {
        for raw in ["Word.", "word", "WORD", "(word)", "\"Word!\"", "wo`rd?"] {
            assert_eq!(WordPreprocessor.normalize(raw), "word", "{raw}");
        }
    }

    #[test]
    fn idempotent() {
        for raw in ["Don't", "e.g.", "ÉCOLE", "ｗｏｒｄ！", "re-enter"] {
            let once = WordPreprocessor.normalize(raw);
            assert_eq!(WordPreprocessor.normalize(&once), once);
        }
    }

    #[test]
    fn keeps_other_characters() {
        assert_eq!(WordPreprocessor.normalize("re-enter;"), "re-enter;");
        assert_eq!(WordPreprocessor.normalize("Don't"), "dont");
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(WordPreprocessor.normalize("..."), "");
        assert_eq!(WordPreprocessor.normalize("(!)"), "");
    }
}
