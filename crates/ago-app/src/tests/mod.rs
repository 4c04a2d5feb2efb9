mod review_tests;

use std::collections::HashMap;

use ago_core::{Dictionary, Engine, LookupError, Store};
use tempfile::TempDir;

/// Dictionary answering from a fixed table; other words fail like a dead network
pub(crate) struct TableDictionary(HashMap<&'static str, &'static str>);

impl TableDictionary {
    pub fn new(entries: &[(&'static str, &'static str)]) -> Self {
        Self(entries.iter().copied().collect())
    }
}

#[async_trait::async_trait]
impl Dictionary for TableDictionary {
    fn name(&self) -> &str {
        "table"
    }

    async fn define(&self, word: &str) -> Result<String, LookupError> {
        self.0
            .get(word)
            .map(|definition| definition.to_string())
            .ok_or_else(|| LookupError::Network {
                url: format!("table://{word}"),
                message: "no entry".into(),
            })
    }
}

pub(crate) fn open_engine(dir: &TempDir) -> Engine {
    Engine::open(Store::open(dir.path().join("ago")).unwrap(), 500).unwrap()
}
