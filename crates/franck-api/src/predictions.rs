//! `GET /predictions`

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use franck_core::bot::Responder;
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Only the most recent `limit` lines. All of them if absent.
  pub limit: Option<usize>,
}

/// `GET /predictions[?limit=<n>]`, oldest first.
pub async fn list<R>(
  State(bot): State<Arc<R>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<String>>, ApiError>
where
  R: Responder,
{
  let lines = bot.predictions(params.limit).await.map_err(ApiError::store)?;
  Ok(Json(lines))
}
