//! HTTP front end for FranckAI.
//!
//! Exposes an axum [`Router`] backed by any [`franck_core::bot::Responder`].
//! Transport concerns (binding, tracing layers) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = franck_api::api_router(Arc::new(dispatcher));
//! axum::serve(listener, app).await?;
//! ```

pub mod chat;
pub mod error;
pub mod knowledge;
pub mod predictions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use franck_core::bot::Responder;

pub use error::ApiError;

/// Build the API router for `bot`.
pub fn api_router<R>(bot: Arc<R>) -> Router<()>
where
  R: Responder + 'static,
{
  Router::new()
    // Chat
    .route("/", get(chat::index))
    .route("/ask", post(chat::ask::<R>))
    // Knowledge
    .route("/knowledge", get(knowledge::get_one::<R>))
    .route("/knowledge/correct", post(knowledge::correct::<R>))
    // Predictions
    .route("/predictions", get(predictions::list::<R>))
    .with_state(bot)
}
