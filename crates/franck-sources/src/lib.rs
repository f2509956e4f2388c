//! HTTP clients for the data providers FranckAI draws on.
//!
//! - [`AllSportsClient`] — countries, leagues, teams and live scores.
//! - [`SportMonksClient`] and [`ApiFootballClient`] — club lookups.
//! - [`WikipediaClient`] — the [`Encyclopedia`](franck_core::sources::Encyclopedia)
//!   used as the last fallback.
//!
//! [`SportsHub`] combines the sports clients behind
//! [`SportsData`](franck_core::sources::SportsData).

mod allsports;
mod api_football;
mod hub;
mod sportmonks;
mod wikipedia;

pub mod error;

use std::time::Duration;

pub use allsports::{ALLSPORTS_BASE_URL, AllSportsClient};
pub use api_football::{
  API_FOOTBALL_BASE_URL, API_FOOTBALL_HOST, ApiFootballClient,
};
pub use error::{Error, Result};
pub use hub::SportsHub;
pub use sportmonks::{SPORTMONKS_BASE_URL, SportMonksClient};
pub use wikipedia::{WIKIPEDIA_TIMEOUT, WikipediaClient};

pub const USER_AGENT: &str = concat!("FranckAI/", env!("CARGO_PKG_VERSION"));

/// Default timeout for sports-data providers.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared client builder: every provider gets the same user agent.
fn http_client(timeout: Duration) -> Result<reqwest::Client> {
  Ok(
    reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(timeout)
      .build()?,
  )
}

/// Deserialize an id that providers send either as a number or a string.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
  D: serde::Deserializer<'de>,
{
  use serde::{Deserialize, de::Error as _};

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Repr {
    Number(i64),
    Text(String),
  }

  match Repr::deserialize(deserializer)? {
    Repr::Number(n) => Ok(n),
    Repr::Text(s) => s.trim().parse().map_err(D::Error::custom),
  }
}
