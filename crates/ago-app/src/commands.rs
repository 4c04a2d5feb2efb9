use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Subcommand;

use crate::state::AppState;

pub mod documents;
pub mod review;
pub mod words;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List ingested documents
    LsDocs,
    /// Ingest documents and count their words
    AddDocs {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove documents by id (their word counts stay)
    RmDocs {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List words, most urgent first
    Words,
    /// Look a word up in the online dictionary
    Dic { word: String },
    /// Start a review session
    Test {
        /// Number of questions
        #[arg(allow_hyphen_values = true)]
        count: Option<String>,
    },
}

pub async fn dispatch(state: &mut AppState, command: Command) -> anyhow::Result<ExitCode> {
    let mut out = io::stdout().lock();

    match command {
        Command::LsDocs => documents::list_documents(&state.engine, &mut out),
        Command::AddDocs { paths } => documents::add_documents(&mut state.engine, &paths, &mut out),
        Command::RmDocs { ids } => documents::remove_documents(&mut state.engine, &ids, &mut out),
        Command::Words => words::list_words(&state.engine, &mut out),
        Command::Dic { word } => {
            words::lookup_word(&mut state.engine, &state.dictionary, &word, &mut out).await
        }
        Command::Test { count } => {
            let requested =
                review::parse_question_count(count.as_deref(), state.config.review.question_count);
            let input = io::stdin().lock();
            review::run_test_session(&mut state.engine, &state.dictionary, requested, input, out)
                .await
        }
    }
}
