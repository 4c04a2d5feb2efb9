pub mod daum;
pub mod sections;

pub use daum::DaumDictionary;
pub use sections::{SECTIONS, Section, definition_block};
