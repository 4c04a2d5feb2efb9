use serde::{Deserialize, Serialize};

use crate::env_parse;

pub const DEFAULT_ENDPOINT: &str = "http://dic.daum.net/search.do";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_lookup_bonus() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Search page of the upstream dictionary
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Upper bound for a single fetch
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Frequency credited to a word first seen through a lookup
    #[serde(default = "default_lookup_bonus")]
    pub lookup_bonus: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout_seconds(),
            lookup_bonus: default_lookup_bonus(),
        }
    }
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let endpoint = std::env::var("AGO_DICT_ENDPOINT").unwrap_or_else(|_| default_endpoint());

        Self {
            endpoint,
            timeout_seconds: env_parse("AGO_DICT_TIMEOUT_SECONDS")
                .unwrap_or_else(default_timeout_seconds),
            lookup_bonus: env_parse("AGO_LOOKUP_BONUS").unwrap_or_else(default_lookup_bonus),
        }
    }
}
