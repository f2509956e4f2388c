//! Handlers for `/knowledge` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/knowledge` | `?question` required; 404 if nothing is cached |
//! | `POST` | `/knowledge/correct` | Body: [`CorrectionBody`]; returns the number of validated exchanges |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use franck_core::{bot::Responder, knowledge::Answer};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Get one ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KnowledgeParams {
  pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KnowledgeEntry {
  pub question: String,
  pub answer:   Answer,
}

/// `GET /knowledge?question=<q>`
pub async fn get_one<R>(
  State(bot): State<Arc<R>>,
  Query(params): Query<KnowledgeParams>,
) -> Result<Json<KnowledgeEntry>, ApiError>
where
  R: Responder,
{
  let answer = bot
    .cached(&params.question)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no answer for {:?}", params.question))
    })?;

  Ok(Json(KnowledgeEntry {
    question: params.question,
    answer,
  }))
}

// ─── Correct ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionBody {
  pub question: String,
  pub answer:   String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionResult {
  pub validated: usize,
}

/// `POST /knowledge/correct`
pub async fn correct<R>(
  State(bot): State<Arc<R>>,
  Json(body): Json<CorrectionBody>,
) -> Result<Json<CorrectionResult>, ApiError>
where
  R: Responder,
{
  let question = body.question.trim();
  let answer = body.answer.trim();
  if question.is_empty() || answer.is_empty() {
    return Err(ApiError::BadRequest(
      "question and answer must not be blank".to_string(),
    ));
  }

  let validated = bot
    .correct(question, answer.to_string())
    .await
    .map_err(ApiError::store)?;
  tracing::info!(question, validated, "correction received over http");

  Ok(Json(CorrectionResult { validated }))
}
