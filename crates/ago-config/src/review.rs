use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_question_count() -> usize {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Questions per session when none is requested
    #[serde(default = "default_question_count")]
    pub question_count: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
        }
    }
}

impl ReviewConfig {
    pub fn new() -> Self {
        let question_count = env_parse::<usize>("AGO_QUESTION_COUNT")
            .filter(|count| *count > 0)
            .unwrap_or_else(default_question_count);

        Self { question_count }
    }
}
