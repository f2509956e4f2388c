//! JSON-file backend for the FranckAI knowledge store.
//!
//! Learned answers live in one pretty-printed JSON dictionary and predictions
//! in an append-only text log, both inside a data directory. All access goes
//! through a single async mutex.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{DICTIONARY_FILE, JsonStore, PREDICTIONS_FILE};
