//! Core types, scoring engine and dispatcher for the FranckAI chatbot.
//!
//! This crate is deliberately free of HTTP and storage dependencies. External
//! data sources and the knowledge store are expressed as traits; concrete
//! implementations live in `franck-sources` and `franck-store-json`.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod bot;
pub mod engine;
pub mod error;
pub mod form;
pub mod head_to_head;
pub mod history;
pub mod intent;
pub mod knowledge;
pub mod sources;
pub mod statistics;
pub mod strength;
pub mod team;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
