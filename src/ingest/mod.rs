//! Reply ingestion — subject classification, quote/signature stripping,
//! ordered sentence extraction.

pub mod classify;
pub mod normalize;
pub mod sentences;
pub mod strip;

pub use classify::is_reply_to_exercise;
pub use sentences::{MAX_SENTENCES, extract_sentences};
pub use strip::strip_quotes_and_signature;
