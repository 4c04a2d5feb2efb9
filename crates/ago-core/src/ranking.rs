use std::cmp::Ordering;

use crate::words::{WordEntry, WordIndex};

/// Weight of each net failure over success in the urgency score
pub const FAILURE_WEIGHT: i64 = 100;

/// Orders words by how urgently they need review.
///
/// `urgency = total_frequency + weight * (failures - successes)`: frequent
/// words come first, and a net excess of failures pushes a word to the front
/// while a net excess of successes pushes it back.
#[derive(Debug, Clone, Copy)]
pub struct ImportanceRanker {
    failure_weight: i64,
}

impl Default for ImportanceRanker {
    fn default() -> Self {
        Self {
            failure_weight: FAILURE_WEIGHT,
        }
    }
}

impl ImportanceRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn urgency(&self, entry: &WordEntry) -> i64 {
        let frequency = i64::try_from(entry.total_frequency).unwrap_or(i64::MAX);
        let net_failures = entry.failures() as i64 - entry.successes() as i64;
        frequency.saturating_add(self.failure_weight.saturating_mul(net_failures))
    }

    /// Descending urgency
    pub fn compare(&self, a: &WordEntry, b: &WordEntry) -> Ordering {
        self.urgency(b).cmp(&self.urgency(a))
    }

    /// All entries, most urgent first. Ties keep their input order.
    pub fn rank<'a>(&self, entries: impl IntoIterator<Item = &'a WordEntry>) -> Vec<&'a WordEntry> {
        let mut ranked: Vec<&WordEntry> = entries.into_iter().collect();
        ranked.sort_by(|a, b| self.compare(a, b));
        ranked
    }

    /// The `count` most urgent words, or all of them if there are fewer
    pub fn top<'a>(&self, index: &'a WordIndex, count: usize) -> Vec<&'a WordEntry> {
        let mut ranked = self.rank(index.iter());
        ranked.truncate(count);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::words::Outcome;

    fn entry(index: &mut WordIndex, word: &str, frequency: u64, fails: usize, successes: usize) {
        index.record_occurrence(word, frequency, 1);
        for _ in 0..fails {
            index.record_outcome(word, Outcome::Fail, Utc::now());
        }
        for _ in 0..successes {
            index.record_outcome(word, Outcome::Success, Utc::now());
        }
    }

    #[test]
    fn struggling_word_scores() {
        let mut index = WordIndex::new();
        entry(&mut index, "struggle", 10, 3, 1);
        entry(&mut index, "common", 500, 0, 0);

        let ranker = ImportanceRanker::new();
        assert_eq!(ranker.urgency(index.get("struggle").unwrap()), 210);
        assert_eq!(ranker.urgency(index.get("common").unwrap()), 500);

        let ranked: Vec<_> = ranker.rank(index.iter()).iter().map(|e| e.word.as_str()).collect();
        assert_eq!(ranked, vec!["common", "struggle"]);
    }

    #[test]
    fn mastered_words_sink() {
        let mut index = WordIndex::new();
        entry(&mut index, "mastered", 150, 0, 2);
        entry(&mut index, "fresh", 1, 0, 0);

        let ranker = ImportanceRanker::new();
        assert_eq!(ranker.urgency(index.get("mastered").unwrap()), -50);
        let ranked: Vec<_> = ranker.rank(index.iter()).iter().map(|e| e.word.as_str()).collect();
        assert_eq!(ranked, vec!["fresh", "mastered"]);
    }

    #[test]
    fn empty_index_ranks_to_nothing() {
        let index = WordIndex::new();
        assert!(ImportanceRanker::new().rank(index.iter()).is_empty());
        assert!(ImportanceRanker::new().top(&index, 5).is_empty());
    }

    #[test]
    fn ranking_is_a_descending_permutation() {
        let mut index = WordIndex::new();
        for (i, word) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            entry(&mut index, word, (i as u64 * 37) % 11, i % 3, i % 2);
        }
        entry(&mut index, "tie1", 5, 0, 0);
        entry(&mut index, "tie2", 5, 0, 0);

        let ranker = ImportanceRanker::new();
        let ranked = ranker.rank(index.iter());
        assert_eq!(ranked.len(), index.len());

        let mut words: Vec<_> = ranked.iter().map(|e| e.word.clone()).collect();
        words.sort();
        words.dedup();
        assert_eq!(words.len(), index.len());

        assert!(
            ranked
                .windows(2)
                .all(|pair| ranker.urgency(pair[0]) >= ranker.urgency(pair[1]))
        );
    }

    #[test]
    fn top_truncates() {
        let mut index = WordIndex::new();
        entry(&mut index, "only", 1, 0, 0);
        assert_eq!(ImportanceRanker::new().top(&index, 2).len(), 1);

        entry(&mut index, "second", 2, 0, 0);
        entry(&mut index, "third", 3, 0, 0);
        let top: Vec<_> = ImportanceRanker::new()
            .top(&index, 2)
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        assert_eq!(top, vec!["third", "second"]);
    }
}
