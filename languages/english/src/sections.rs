use ago_extract::{parse, strip_scripts};

/// A labelled part of the Daum result page
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub heading: &'static str,
    pub tag: &'static str,
    pub class: &'static str,
}

/// Sections in output order. The bare `card_word` class matches the widest
/// card, so it comes last.
pub const SECTIONS: [Section; 4] = [
    Section {
        heading: "Related Words",
        tag: "div",
        class: "card_relate",
    },
    Section {
        heading: "Word",
        tag: "div",
        class: "card_word #word #word",
    },
    Section {
        heading: "Meaning",
        tag: "div",
        class: "card_word #word #mean",
    },
    Section {
        heading: "Examples",
        tag: "div",
        class: "card_word",
    },
];

/// Render the readable definition block of a result page.
///
/// Each section is looked up on its own and left out when missing; a page
/// that cannot be parsed at all yields an empty block.
pub fn definition_block(html: &str) -> String {
    let cleaned = strip_scripts(html);
    let root = match parse(&cleaned) {
        Ok(root) => root,
        Err(e) => {
            tracing::warn!("unusable dictionary page: {e}");
            return String::new();
        }
    };

    let mut block = String::new();
    for section in &SECTIONS {
        match root.find_first(section.tag, section.class) {
            Some(node) => {
                block.push_str(&format!("# {}\n{}\n\n", section.heading, node.flatten_to_text()));
            }
            None => tracing::debug!("section {:?} not on page", section.heading),
        }
    }
    block
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const RESULT_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>ephemeral - Daum</title>
<script>var tpl = "<div class=\"card_word\">fake</div>";</script>
<meta charset="utf-8"></head>
<body>
<div class="card_relate"><a href="/w1">ephemera</a><a href="/w2">ephemerality</a></div>
<div class="card_word">
  <div class="card_word #word #word"><span class="txt_emph1">ephemeral</span></div>
  <div class="card_word #word #mean"><ul><li><span>short&#45;lived</span><li><span>fleeting</span></ul></div>
  <div class="box_example"><span class="txt_ex">Fame is ephemeral.</span><span class="txt_trans">Glory fades.</span></div>
</div>
<script src="/tail.js"></script>
</body></html>"#;

    #[test]
    fn renders_all_sections_in_order() {
        let block = definition_block(RESULT_PAGE);
        assert_eq!(
            block,
            "# Related Words\nephemera ephemerality \n\n\
             # Word\nephemeral \n\n\
             # Meaning\nshort-lived fleeting \n\n\
             # Examples\nephemeral short-lived fleeting Fame is ephemeral. \nGlory fades. \n\n"
        );
    }

    #[test]
    fn missing_sections_are_omitted() {
        let page = r#"<html><body><div class="card_word #word #mean"><span>only meaning</span></div></body></html>"#;
        assert_eq!(definition_block(page), "# Meaning\nonly meaning \n\n");
    }

    #[test]
    fn accented_entities_are_decoded() {
        let page = r#"<div class="card_word #word #mean"><span>caf&eacute; &frac12; na&iuml;ve</span></div>"#;
        assert_eq!(definition_block(page), "# Meaning\ncafé ½ naïve \n\n");
    }

    #[test]
    fn page_without_sections_is_empty() {
        assert_eq!(definition_block("<html><body><p>No results</p></body></html>"), "");
    }

    #[test]
    fn unparseable_page_is_empty() {
        assert_eq!(definition_block(""), "");
        assert_eq!(definition_block("<script>only a script</script>"), "");
    }
}
