use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};

use crate::dictionary::Dictionary;
use crate::engine::{Engine, Question};
use crate::error::StorageError;
use crate::words::Outcome;

const SEPARATOR_HEAVY: &str = "==============================================";
const SEPARATOR_LIGHT: &str = "----------------------------------------------";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Where a review session currently stands. Indices refer to the selected questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Declined,
    Confirmed,
    /// Word shown, definition hidden
    Presented(usize),
    /// Definition shown (or reported unavailable)
    Revealed(usize),
    /// Feedback stored and persisted
    Recorded(usize),
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub declined: bool,
    pub asked: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Questions whose definition could not be fetched
    pub unavailable: usize,
}

/// Answers starting with `y`/`Y` are affirmative; everything else, including
/// an empty line, is not.
pub fn is_affirmative(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

/// One interactive review run over the most urgent words.
///
/// All feedback of a session carries the same timestamp, taken when the
/// session is created.
pub struct ReviewSession<'a, R, W> {
    engine: &'a mut Engine,
    dictionary: &'a dyn Dictionary,
    input: R,
    output: W,
    requested: usize,
    started_at: DateTime<Utc>,
    state: SessionState,
    questions: Vec<Question>,
    summary: SessionSummary,
}

impl<'a, R: BufRead, W: Write> ReviewSession<'a, R, W> {
    pub fn new(
        engine: &'a mut Engine,
        dictionary: &'a dyn Dictionary,
        input: R,
        output: W,
        requested: usize,
    ) -> Self {
        Self {
            engine,
            dictionary,
            input,
            output,
            requested,
            started_at: Utc::now(),
            state: SessionState::NotStarted,
            questions: Vec::new(),
            summary: SessionSummary::default(),
        }
    }

    pub fn with_start_time(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Drive the session to `Finished`
    pub async fn run(mut self) -> Result<SessionSummary, SessionError> {
        while self.state != SessionState::Finished {
            self.step().await?;
        }
        self.output.flush()?;
        Ok(self.summary)
    }

    /// Perform one transition and return the new state
    pub async fn step(&mut self) -> Result<SessionState, SessionError> {
        let next = match self.state {
            SessionState::NotStarted => self.confirm()?,
            SessionState::Declined => SessionState::Finished,
            SessionState::Confirmed => self.present(0)?,
            SessionState::Presented(idx) => self.reveal(idx).await?,
            SessionState::Revealed(idx) => self.record(idx)?,
            SessionState::Recorded(idx) => self.present(idx + 1)?,
            SessionState::Finished => SessionState::Finished,
        };
        tracing::debug!("review session {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(next)
    }

    /// Read one line; end of input reads as an empty answer
    fn read_answer(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn confirm(&mut self) -> Result<SessionState, SessionError> {
        write!(self.output, "Let the game begin\n\nReady? (Yes/[No])\n")?;
        let answer = self.read_answer()?;
        if !is_affirmative(&answer) {
            writeln!(self.output, "OK, see you later ;)")?;
            self.summary.declined = true;
            return Ok(SessionState::Declined);
        }

        self.questions = self.engine.questions(self.requested);
        tracing::info!(
            "review session with {} of {} requested questions",
            self.questions.len(),
            self.requested
        );
        if self.questions.is_empty() {
            writeln!(self.output, "No words to review yet. Add some documents first.")?;
        }
        Ok(SessionState::Confirmed)
    }

    fn present(&mut self, idx: usize) -> Result<SessionState, SessionError> {
        let Some(question) = self.questions.get(idx) else {
            return Ok(SessionState::Finished);
        };

        writeln!(self.output, "{SEPARATOR_HEAVY}")?;
        writeln!(self.output, "Question {}/{}:", idx + 1, self.questions.len())?;
        writeln!(self.output, "\n [[ {} ]]", question.word)?;
        writeln!(self.output, "\n\nPress Enter after you remember the meaning of it:")?;
        writeln!(
            self.output,
            "\n Reference: {} Test success/fail: {}/{}",
            question.total_frequency, question.successes, question.failures
        )?;
        self.summary.asked += 1;
        Ok(SessionState::Presented(idx))
    }

    async fn reveal(&mut self, idx: usize) -> Result<SessionState, SessionError> {
        // any input, including none, moves on
        self.read_answer()?;

        let word = self.questions[idx].word.clone();
        writeln!(self.output, "{SEPARATOR_LIGHT}")?;
        match self.dictionary.define(&word).await {
            Ok(definition) => {
                writeln!(self.output, "The meaning of {word} was:\n{definition}\n")?;
            }
            Err(e) => {
                tracing::warn!("definition of {word:?} unavailable: {e}");
                self.summary.unavailable += 1;
                writeln!(self.output, "The meaning of {word} is unavailable: {e}\n")?;
            }
        }
        writeln!(self.output, "{SEPARATOR_LIGHT}")?;
        Ok(SessionState::Revealed(idx))
    }

    fn record(&mut self, idx: usize) -> Result<SessionState, SessionError> {
        writeln!(self.output, "Were you understanding it well? (Yes/No)")?;
        let answer = self.read_answer()?;

        let outcome = if is_affirmative(&answer) {
            self.summary.succeeded += 1;
            writeln!(self.output, "your feedback, Yes applied")?;
            Outcome::Success
        } else {
            self.summary.failed += 1;
            writeln!(self.output, "your feedback, No applied")?;
            Outcome::Fail
        };

        let word = &self.questions[idx].word;
        self.engine.record_outcome(word, outcome, self.started_at)?;
        writeln!(self.output, "{SEPARATOR_LIGHT}\n\n\n")?;
        Ok(SessionState::Recorded(idx))
    }
}
