use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::review::ReviewConfig;
use self::storage::StorageConfig;

pub mod dictionary;
pub mod review;
pub mod storage;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to open config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub dictionary: DictionaryConfig,
    pub review: ReviewConfig,
}

impl Config {
    /// Build the config from `AGO_*` environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            storage: StorageConfig::new(),
            dictionary: DictionaryConfig::new(),
            review: ReviewConfig::new(),
        }
    }

    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override the storage root, e.g. from a command-line flag
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.storage.data_dir = data_dir;
        self
    }
}

/// Parse an environment variable, ignoring unset or malformed values
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "dictionary": {{ "timeout_seconds": 3 }}, "review": {{ "question_count": 8 }} }}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.dictionary.timeout_seconds, 3);
        assert_eq!(config.dictionary.endpoint, dictionary::DEFAULT_ENDPOINT);
        assert_eq!(config.dictionary.lookup_bonus, 500);
        assert_eq!(config.review.question_count, 8);
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn data_dir_override() {
        let config = Config::default().with_data_dir(PathBuf::from("/srv/ago"));
        assert_eq!(config.storage.data_dir, PathBuf::from("/srv/ago"));
    }
}
