use std::path::{Path, PathBuf};

use ago_config::Config;
use chrono::{DateTime, Utc};

use crate::dictionary::Dictionary;
use crate::documents::{Document, DocumentList};
use crate::error::{DocumentError, EngineError, StorageError};
use crate::preprocess::{Preprocessor, WordPreprocessor};
use crate::ranking::ImportanceRanker;
use crate::store::Store;
use crate::words::{DocumentId, Outcome, WordEntry, WordIndex};

/// Snapshot of a word as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub word: String,
    pub total_frequency: u64,
    pub successes: usize,
    pub failures: usize,
}

impl From<&WordEntry> for Question {
    fn from(entry: &WordEntry) -> Self {
        Self {
            word: entry.word.clone(),
            total_frequency: entry.total_frequency,
            successes: entry.successes(),
            failures: entry.failures(),
        }
    }
}

/// Per-item results of a batch command
#[derive(Debug)]
pub struct BatchReport<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<(String, DocumentError)>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchReport<T> {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owns the word index and document list for one run.
pub struct Engine {
    store: Store,
    words: WordIndex,
    documents: DocumentList,
    ranker: ImportanceRanker,
    lookup_bonus: u64,
}

impl Engine {
    pub fn open(store: Store, lookup_bonus: u64) -> Result<Self, StorageError> {
        let words = store.load_words()?;
        let documents = store.load_documents()?;
        tracing::debug!(
            "loaded {} words and {} documents from {}",
            words.len(),
            documents.len(),
            store.root().display()
        );

        Ok(Self {
            store,
            words,
            documents,
            ranker: ImportanceRanker::default(),
            lookup_bonus,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, StorageError> {
        let store = Store::open(&config.storage.data_dir)?;
        Self::open(store, config.dictionary.lookup_bonus)
    }

    pub fn words(&self) -> &WordIndex {
        &self.words
    }

    pub fn documents(&self) -> &DocumentList {
        &self.documents
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn save_words(&self) -> Result<(), StorageError> {
        self.store.save_words(&self.words)
    }

    pub fn save(&self) -> Result<(), StorageError> {
        self.store.save_documents(&self.documents)?;
        self.save_words()
    }

    /// Every word, most urgent first
    pub fn list_words(&self) -> Vec<Question> {
        self.ranker
            .rank(self.words.iter())
            .into_iter()
            .map(Question::from)
            .collect()
    }

    /// Up to `count` of the most urgent words
    pub fn questions(&self, count: usize) -> Vec<Question> {
        self.ranker
            .top(&self.words, count)
            .into_iter()
            .map(Question::from)
            .collect()
    }

    /// Ingest one file: keep a copy, count its words, list it. Nothing is saved.
    pub fn add_document(&mut self, path: &Path) -> Result<Document, DocumentError> {
        let contents = Store::read_all_text(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| DocumentError::InvalidName(path.to_path_buf()))?;

        let id = self.documents.next_id();
        self.store.import_document(id, path, &contents)?;
        let distinct = self
            .words
            .record_text(&String::from_utf8_lossy(&contents), id);

        let document = self.documents.push(name);
        tracing::info!(
            "added document {} as {} ({distinct} distinct words)",
            document.name,
            document.id
        );
        Ok(document)
    }

    /// Ingest files one by one, then save once. A failing file does not stop the others.
    pub fn add_documents(
        &mut self,
        paths: &[PathBuf],
    ) -> Result<BatchReport<Document>, StorageError> {
        let mut report = BatchReport::default();
        for path in paths {
            match self.add_document(path) {
                Ok(document) => report.succeeded.push(document),
                Err(e) => {
                    tracing::warn!("failed to add {}: {e}", path.display());
                    report.failed.push((path.display().to_string(), e));
                }
            }
        }
        self.save()?;
        Ok(report)
    }

    /// Forget a document and delete its copy. Word frequencies it contributed stay.
    pub fn remove_document(&mut self, id: DocumentId) -> Result<Document, DocumentError> {
        if self.documents.get(id).is_none() {
            return Err(DocumentError::UnknownId(id));
        }
        self.store.remove_document(id)?;
        self.documents
            .remove(id)
            .ok_or(DocumentError::UnknownId(id))
    }

    pub fn remove_documents(
        &mut self,
        ids: &[DocumentId],
    ) -> Result<BatchReport<Document>, StorageError> {
        let mut report = BatchReport::default();
        for &id in ids {
            match self.remove_document(id) {
                Ok(document) => report.succeeded.push(document),
                Err(e) => {
                    tracing::warn!("failed to remove document {id}: {e}");
                    report.failed.push((id.to_string(), e));
                }
            }
        }
        self.store.save_documents(&self.documents)?;
        Ok(report)
    }

    /// Record a review outcome and persist the word index right away
    pub fn record_outcome(
        &mut self,
        word: &str,
        outcome: Outcome,
        at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let known = self.words.record_outcome(word, outcome, at);
        if !known {
            tracing::warn!("review outcome for unknown word {word:?} dropped");
            return Ok(false);
        }
        self.save_words()?;
        Ok(true)
    }

    /// Fetch a definition and count the lookup as a failed recall.
    ///
    /// Unseen words enter the index with the lookup bonus. When the fetch
    /// fails nothing is recorded.
    pub async fn lookup_word(
        &mut self,
        dictionary: &dyn Dictionary,
        word: &str,
    ) -> Result<String, EngineError> {
        let query = word.trim();
        if WordPreprocessor.normalize(query).is_empty() {
            return Err(EngineError::InvalidWord(word.to_string()));
        }

        let definition = dictionary.define(query).await?;
        self.words
            .upsert_with_history(query, Outcome::Fail, self.lookup_bonus, Utc::now());
        if let Err(source) = self.save_words() {
            return Err(EngineError::Unsaved {
                word: query.to_string(),
                definition,
                source,
            });
        }
        tracing::info!("looked up {query:?} in {}", dictionary.name());
        Ok(definition)
    }
}
