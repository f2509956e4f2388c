//! Learned answers, the interaction log and the `KnowledgeStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `franck-store-json`).
//! The dispatcher depends on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cache key for a question: case-folded, nothing else.
///
/// Whitespace and punctuation are kept, so `"Qui est Mbappé ?"` and
/// `"qui est mbappé"` are different entries.
pub fn normalize_question(question: &str) -> String { question.to_lowercase() }

// ─── Answers ─────────────────────────────────────────────────────────────────

/// Placeholder stored for profile sections nobody has filled in yet.
pub const PROFILE_TACTICS_TODO: &str = "Tactique à compléter.";
pub const PROFILE_TRANSFERS_TODO: &str = "Transferts à compléter.";
pub const PROFILE_PERFORMANCE_TODO: &str = "Performance à compléter.";

/// Structured knowledge about a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubProfile {
  pub definition:  String,
  pub tactics:     String,
  pub transfers:   String,
  pub performance: String,
}

impl ClubProfile {
  /// A profile with only the definition known.
  pub fn from_definition(definition: impl Into<String>) -> Self {
    Self {
      definition:  definition.into(),
      tactics:     PROFILE_TACTICS_TODO.to_string(),
      transfers:   PROFILE_TRANSFERS_TODO.to_string(),
      performance: PROFILE_PERFORMANCE_TODO.to_string(),
    }
  }
}

/// A cached answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
  PlainText(String),
  ClubProfile(ClubProfile),
}

impl Answer {
  /// The text shown to the user. For a club profile this is its definition.
  pub fn text(&self) -> &str {
    match self {
      Self::PlainText(text) => text,
      Self::ClubProfile(profile) => &profile.definition,
    }
  }
}

impl From<String> for Answer {
  fn from(text: String) -> Self { Self::PlainText(text) }
}

impl From<&str> for Answer {
  fn from(text: &str) -> Self { Self::PlainText(text.to_string()) }
}

impl From<ClubProfile> for Answer {
  fn from(profile: ClubProfile) -> Self { Self::ClubProfile(profile) }
}

// ─── Interaction log ─────────────────────────────────────────────────────────

/// One question/answer exchange. `validated` flips to `true` once a human
/// has corrected (and so confirmed) the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
  pub interaction_id: Uuid,
  pub question:       String,
  pub answer:         String,
  pub validated:      bool,
  pub recorded_at:    DateTime<Utc>,
}

impl Interaction {
  pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      interaction_id: Uuid::new_v4(),
      question:       question.into(),
      answer:         answer.into(),
      validated:      false,
      recorded_at:    Utc::now(),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the knowledge cache, interaction log and prediction log.
///
/// Answers are keyed by [`normalize_question`]; writes overwrite silently.
/// The interaction log is append-only apart from [`correct`](Self::correct).
pub trait KnowledgeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Answers ───────────────────────────────────────────────────────────

  /// The cached answer for `question`, if any.
  fn get<'a>(
    &'a self,
    question: &'a str,
  ) -> impl Future<Output = Result<Option<Answer>, Self::Error>> + Send + 'a;

  /// Store `answer` for `question`, replacing any previous answer.
  fn put<'a>(
    &'a self,
    question: &'a str,
    answer: Answer,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Overwrite the answer for `question` and mark every logged interaction
  /// with exactly that question as validated, rewriting its answer.
  ///
  /// Returns the number of interactions validated.
  fn correct<'a>(
    &'a self,
    question: &'a str,
    answer: Answer,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Keys of every answer stored as a [`ClubProfile`], i.e. the clubs the
  /// bot has learned.
  fn club_names(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Interactions ──────────────────────────────────────────────────────

  fn log_interaction(
    &self,
    question: String,
    answer: String,
  ) -> impl Future<Output = Result<Interaction, Self::Error>> + Send + '_;

  /// Every logged interaction, oldest first.
  fn interactions(
    &self,
  ) -> impl Future<Output = Result<Vec<Interaction>, Self::Error>> + Send + '_;

  // ── Predictions ───────────────────────────────────────────────────────

  /// Append one line to the prediction log.
  fn log_prediction(
    &self,
    line: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The last `limit` prediction lines (all of them if `None`), oldest
  /// first.
  fn predictions(
    &self,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
