//! Startup errors for `franck-server`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("knowledge store: {0}")]
  Store(#[from] franck_store_json::Error),

  #[error("data source client: {0}")]
  Sources(#[from] franck_sources::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
