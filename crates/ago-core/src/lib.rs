pub mod dictionary;
pub mod documents;
pub mod engine;
pub mod error;
pub mod preprocess;
pub mod ranking;
pub mod session;
pub mod store;
pub mod words;

pub use dictionary::{Dictionary, LookupError};
pub use engine::{BatchReport, Engine, Question};
pub use error::{DocumentError, EngineError, StorageError};
pub use ranking::ImportanceRanker;
pub use session::{ReviewSession, SessionError, SessionState, SessionSummary};
pub use store::Store;
pub use words::{DocumentId, Outcome, WordEntry, WordIndex};
