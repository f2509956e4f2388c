//! The chat page and `POST /ask`.

use std::sync::Arc;

use axum::{
  Form, Json,
  extract::State,
  response::Html,
};
use franck_core::bot::Responder;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const EMPTY_MESSAGE: &str = "Message vide";

static INDEX_HTML: &str = include_str!("../static/index.html");

/// `GET /`
pub async fn index() -> Html<&'static str> { Html(INDEX_HTML) }

#[derive(Debug, Deserialize)]
pub struct AskForm {
  /// A missing field is treated like an empty message.
  #[serde(default)]
  pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
  pub response: String,
}

/// `POST /ask` with form field `message`.
pub async fn ask<R>(
  State(bot): State<Arc<R>>,
  Form(form): Form<AskForm>,
) -> Result<Json<AskResponse>, ApiError>
where
  R: Responder,
{
  let message = form.message.trim();
  if message.is_empty() {
    return Err(ApiError::BadRequest(EMPTY_MESSAGE.to_string()));
  }
  let response = bot.respond(message).await;
  Ok(Json(AskResponse { response }))
}
