use std::io::{BufRead, Write};
use std::process::ExitCode;

use ago_core::{Dictionary, Engine, ReviewSession};

/// Requested question count; anything but a positive integer falls back to `default`
pub fn parse_question_count(arg: Option<&str>, default: usize) -> usize {
    let Some(arg) = arg else {
        return default;
    };
    match arg.trim().parse::<usize>() {
        Ok(count) if count > 0 => count,
        _ => {
            tracing::warn!(
                "wrong argument {arg:?}, it must be a positive integer; asking {default}"
            );
            default
        }
    }
}

pub async fn run_test_session(
    engine: &mut Engine,
    dictionary: &dyn Dictionary,
    requested: usize,
    input: impl BufRead,
    output: impl Write,
) -> anyhow::Result<ExitCode> {
    let summary = ReviewSession::new(engine, dictionary, input, output, requested)
        .run()
        .await?;
    tracing::info!(
        "session done: {} asked, {} yes, {} no, {} without definition",
        summary.asked,
        summary.succeeded,
        summary.failed,
        summary.unavailable
    );
    Ok(ExitCode::SUCCESS)
}
