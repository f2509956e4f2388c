//! External data-source traits and the records they return.
//!
//! Implementations live in `franck-sources`. Every method reports failure as
//! absence (`None` or an empty `Vec`); implementations log the cause.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::team::TeamId;

// ─── Sports data ─────────────────────────────────────────────────────────────

/// Basic facts about a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
  pub id:      TeamId,
  pub name:    String,
  pub country: Option<String>,
  pub founded: Option<i32>,
  pub stadium: Option<String>,
}

impl TeamInfo {
  /// One-sentence presentation of the club.
  pub fn describe(&self) -> String {
    let country = self.country.as_deref().unwrap_or("pays inconnu");
    let founded = self
      .founded
      .map(|year| year.to_string())
      .unwrap_or_else(|| "année inconnue".to_string());
    let stadium = self.stadium.as_deref().unwrap_or("Inconnu");
    format!(
      "{} est basé en {country}. Fondé en {founded}, son stade est {stadium}.",
      self.name
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveMatch {
  pub home_team: String,
  pub away_team: String,
  /// Score as reported by the provider, e.g. `"2 - 1"`.
  pub score:     String,
  /// Match clock or status, e.g. `"67"` or `"Half Time"`.
  pub status:    String,
  pub league:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub id:   i64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
  pub id:      i64,
  pub name:    String,
  pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
  pub id:   TeamId,
  pub name: String,
}

/// Live football data.
pub trait SportsData: Send + Sync {
  /// Best match for a club name.
  fn find_team<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Option<TeamInfo>> + Send + 'a;

  fn live_matches(&self) -> impl Future<Output = Vec<LiveMatch>> + Send + '_;

  fn countries(&self) -> impl Future<Output = Vec<Country>> + Send + '_;

  fn leagues<'a>(
    &'a self,
    country: &'a str,
  ) -> impl Future<Output = Vec<League>> + Send + 'a;

  fn teams(
    &self,
    league_id: i64,
  ) -> impl Future<Output = Vec<TeamSummary>> + Send + '_;
}

// ─── Encyclopedia ────────────────────────────────────────────────────────────

/// Title words that mark a search result as football-related.
pub const FOOTBALL_KEYWORDS: &[&str] = &["fc", "football", "club", "équipe"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
  pub title:       String,
  /// Short description, e.g. `"club de football espagnol"`.
  pub description: Option<String>,
  pub extract:     Option<String>,
}

impl PageSummary {
  pub fn is_about_football(&self) -> bool {
    self
      .description
      .as_deref()
      .is_some_and(|d| d.to_lowercase().contains("football"))
  }

  /// `"Selon Wikipedia (<title>) : <extract>"`
  pub fn quote(&self) -> String {
    let extract = self.extract.as_deref().unwrap_or("Résumé non disponible.");
    format!("Selon Wikipedia ({}) : {extract}", self.title)
  }
}

/// Search and summary lookups against an encyclopedia (Wikipedia).
pub trait Encyclopedia: Send + Sync {
  /// Page titles matching `term`, best first.
  fn search<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Vec<String>> + Send + 'a;

  fn summary<'a>(
    &'a self,
    title: &'a str,
  ) -> impl Future<Output = Option<PageSummary>> + Send + 'a;
}

/// The first title containing a football keyword.
pub fn football_title(titles: &[String]) -> Option<&str> {
  titles
    .iter()
    .find(|title| {
      let title = title.to_lowercase();
      FOOTBALL_KEYWORDS.iter().any(|kw| title.contains(kw))
    })
    .map(String::as_str)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn football_title_prefers_keyword_matches() {
    let titles = vec![
      "Madrid".to_string(),
      "Real Madrid Club de Fútbol".to_string(),
      "Real Madrid FC (homonymie)".to_string(),
    ];
    assert_eq!(football_title(&titles), Some("Real Madrid Club de Fútbol"));
  }

  #[test]
  fn football_title_is_none_without_keywords() {
    let titles = vec!["Madrid".to_string(), "Espagne".to_string()];
    assert_eq!(football_title(&titles), None);
  }

  #[test]
  fn describe_fills_in_missing_fields() {
    let info = TeamInfo {
      id:      1,
      name:    "Olympique de Marseille".into(),
      country: Some("France".into()),
      founded: None,
      stadium: None,
    };
    assert_eq!(
      info.describe(),
      "Olympique de Marseille est basé en France. Fondé en année inconnue, son stade est Inconnu."
    );
  }

  #[test]
  fn summary_quote_has_a_fallback_extract() {
    let page = PageSummary {
      title:       "Paris Saint-Germain".into(),
      description: Some("Club de football français".into()),
      extract:     None,
    };
    assert!(page.is_about_football());
    assert_eq!(page.quote(), "Selon Wikipedia (Paris Saint-Germain) : Résumé non disponible.");
  }
}
