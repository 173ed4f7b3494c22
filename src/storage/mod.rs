//! Storage layer.
//!
//! The whole collection lives in one JSON document that is read in full and
//! written back wholesale after every mutation:
//! - **`JsonFileStore`**: `quotes.json` in the data directory
//! - **`MemoryStore`**: in-process document for tests

mod json;
mod memory;
mod traits;

pub use json::{JsonFileStore, STORE_FILE_NAME};
pub use memory::MemoryStore;
pub use traits::QuoteStore;
