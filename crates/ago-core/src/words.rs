use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::preprocess::{Preprocessor, WordPreprocessor};

pub type DocumentId = u32;

/// Document id under which dictionary lookups credit their frequency bonus
pub const DICTIONARY_DOCUMENT_ID: DocumentId = 0;

/// Result of one review of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Fail,
}

/// Aggregate frequency and review history of one normalized word.
///
/// Field names match the on-disk format of the word file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    #[serde(rename = "Word")]
    pub word: String,
    #[serde(rename = "Totalfreq", default)]
    pub total_frequency: u64,
    #[serde(rename = "Freq", default, deserialize_with = "null_as_default")]
    pub per_document_frequency: BTreeMap<DocumentId, u64>,
    #[serde(rename = "Succ_history", default, deserialize_with = "null_as_default")]
    pub success_history: Vec<DateTime<Utc>>,
    #[serde(rename = "Fail_history", default, deserialize_with = "null_as_default")]
    pub fail_history: Vec<DateTime<Utc>>,
}

impl WordEntry {
    fn new(word: String) -> Self {
        Self {
            word,
            total_frequency: 0,
            per_document_frequency: BTreeMap::new(),
            success_history: Vec::new(),
            fail_history: Vec::new(),
        }
    }

    pub fn successes(&self) -> usize {
        self.success_history.len()
    }

    pub fn failures(&self) -> usize {
        self.fail_history.len()
    }

    pub fn push_outcome(&mut self, outcome: Outcome, at: DateTime<Utc>) {
        match outcome {
            Outcome::Success => self.success_history.push(at),
            Outcome::Fail => self.fail_history.push(at),
        }
    }

    /// Fold another entry for the same word into this one
    fn merge(&mut self, other: WordEntry) {
        self.total_frequency += other.total_frequency;
        for (document_id, count) in other.per_document_frequency {
            *self.per_document_frequency.entry(document_id).or_default() += count;
        }
        self.success_history.extend(other.success_history);
        self.success_history.sort();
        self.fail_history.extend(other.fail_history);
        self.fail_history.sort();
    }
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Re-key stored entries under the current normalization. Entries whose keys
/// now collide (e.g. a full-width spelling saved by an older version) are merged.
fn normalized_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, WordEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored: BTreeMap<String, WordEntry> = null_as_default(deserializer)?;
    let mut entries: BTreeMap<String, WordEntry> = BTreeMap::new();

    for (stored_key, mut entry) in stored {
        let key = WordPreprocessor.normalize(&stored_key);
        if key.is_empty() {
            tracing::warn!("dropping stored word {stored_key:?}: nothing left after normalization");
            continue;
        }
        if key != stored_key {
            tracing::debug!("stored word {stored_key:?} re-keyed as {key:?}");
        }

        match entries.get_mut(&key) {
            Some(existing) => existing.merge(entry),
            None => {
                entry.word = key.clone();
                entries.insert(key, entry);
            }
        }
    }
    Ok(entries)
}

/// Every word ever seen, keyed by its normalized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordIndex {
    #[serde(rename = "Wordinfos", default, deserialize_with = "normalized_entries")]
    entries: BTreeMap<String, WordEntry>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.values()
    }

    /// Look a word up by any spelling that normalizes to its key
    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.entries.get(&WordPreprocessor.normalize(word))
    }

    /// Add `count` occurrences of `word` in `document_id`.
    ///
    /// Both the total and the per-document count accumulate. Tokens that
    /// normalize to nothing are ignored and `None` is returned.
    pub fn record_occurrence(
        &mut self,
        word: &str,
        count: u64,
        document_id: DocumentId,
    ) -> Option<&WordEntry> {
        let key = WordPreprocessor.normalize(word);
        if key.is_empty() {
            return None;
        }

        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| WordEntry::new(key));
        entry.total_frequency += count;
        *entry.per_document_frequency.entry(document_id).or_default() += count;
        Some(&*entry)
    }

    /// Count every word of `text` and credit the counts to `document_id`.
    /// Returns the number of distinct words recorded.
    pub fn record_text(&mut self, text: &str, document_id: DocumentId) -> usize {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for token in WordPreprocessor.tokens(text) {
            let key = WordPreprocessor.normalize(token);
            if key.is_empty() {
                continue;
            }
            *counts.entry(key).or_default() += 1;
        }

        let distinct = counts.len();
        for (word, count) in counts {
            self.record_occurrence(&word, count, document_id);
        }
        tracing::debug!("recorded {distinct} distinct words for document {document_id}");
        distinct
    }

    /// Append a review outcome to an existing word. Returns false if the word is unknown.
    pub fn record_outcome(&mut self, word: &str, outcome: Outcome, at: DateTime<Utc>) -> bool {
        match self.entries.get_mut(&WordPreprocessor.normalize(word)) {
            Some(entry) => {
                entry.push_outcome(outcome, at);
                true
            }
            None => false,
        }
    }

    /// Append an outcome, first seeding an unseen word with `frequency_bonus`
    /// under the dictionary document.
    pub fn upsert_with_history(
        &mut self,
        word: &str,
        outcome: Outcome,
        frequency_bonus: u64,
        at: DateTime<Utc>,
    ) -> Option<&WordEntry> {
        let key = WordPreprocessor.normalize(word);
        if key.is_empty() {
            return None;
        }

        if !self.entries.contains_key(&key) {
            self.record_occurrence(&key, frequency_bonus, DICTIONARY_DOCUMENT_ID);
        }
        let entry = self.entries.get_mut(&key)?;
        entry.push_outcome(outcome, at);
        Some(&*entry)
    }
}
