//! Error type for `franck-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A dictionary entry matches none of the known answer shapes.
  #[error("malformed dictionary entry {key:?}: {reason}")]
  MalformedEntry { key: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Attach the offending path to an I/O error.
pub(crate) fn io_at(
  path: impl Into<PathBuf>,
) -> impl FnOnce(std::io::Error) -> Error {
  let path = path.into();
  move |source| Error::Io { path, source }
}
