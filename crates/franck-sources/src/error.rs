//! Error type for `franck-sources`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{provider} returned {status}")]
  Status {
    provider: &'static str,
    status:   reqwest::StatusCode,
  },

  /// The provider answered 200 but flagged the request as failed.
  #[error("{provider} rejected the request: {message}")]
  Rejected {
    provider: &'static str,
    message:  String,
  },

  #[error("invalid url: {0}")]
  Url(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
