use std::io::Write;
use std::process::ExitCode;

use ago_core::{Dictionary, Engine, EngineError};

pub fn list_words(engine: &Engine, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    for question in engine.list_words() {
        writeln!(
            out,
            "word {}:\t total freq {}, succ {}, fail {}",
            question.word, question.total_frequency, question.successes, question.failures
        )?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Print a definition and count the lookup as a failed recall.
/// A fetched definition is printed even when recording it fails.
pub async fn lookup_word(
    engine: &mut Engine,
    dictionary: &dyn Dictionary,
    word: &str,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    match engine.lookup_word(dictionary, word).await {
        Ok(definition) => {
            writeln!(out, "{definition}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(EngineError::Unsaved {
            word,
            definition,
            source,
        }) => {
            writeln!(out, "{definition}")?;
            Err(anyhow::Error::new(source).context(format!("failed to record lookup of {word:?}")))
        }
        Err(e) => Err(e.into()),
    }
}
