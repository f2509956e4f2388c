//! In-memory collaborators for unit tests.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Mutex, PoisonError},
};

use crate::{
  knowledge::{Answer, Interaction, KnowledgeStore, normalize_question},
  sources::{
    Country, Encyclopedia, League, LiveMatch, PageSummary, SportsData,
    TeamInfo, TeamSummary,
  },
  team::fold,
};

// ─── Knowledge ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct Knowledge {
  answers:      HashMap<String, Answer>,
  interactions: Vec<Interaction>,
  predictions:  Vec<String>,
}

#[derive(Default)]
pub struct MemoryKnowledge {
  inner: Mutex<Knowledge>,
}

impl MemoryKnowledge {
  fn with<T>(&self, f: impl FnOnce(&mut Knowledge) -> T) -> T {
    f(&mut self.inner.lock().unwrap_or_else(PoisonError::into_inner))
  }
}

impl KnowledgeStore for MemoryKnowledge {
  type Error = Infallible;

  async fn get(&self, question: &str) -> Result<Option<Answer>, Infallible> {
    Ok(self.with(|k| k.answers.get(&normalize_question(question)).cloned()))
  }

  async fn put(
    &self,
    question: &str,
    answer: Answer,
  ) -> Result<(), Infallible> {
    self.with(|k| k.answers.insert(normalize_question(question), answer));
    Ok(())
  }

  async fn correct(
    &self,
    question: &str,
    answer: Answer,
  ) -> Result<usize, Infallible> {
    Ok(self.with(|k| {
      let mut validated = 0;
      for i in k.interactions.iter_mut().filter(|i| i.question == question) {
        i.validated = true;
        i.answer = answer.text().to_string();
        validated += 1;
      }
      k.answers.insert(normalize_question(question), answer);
      validated
    }))
  }

  async fn club_names(&self) -> Result<Vec<String>, Infallible> {
    Ok(self.with(|k| {
      k.answers
        .iter()
        .filter(|(_, a)| matches!(a, Answer::ClubProfile(_)))
        .map(|(key, _)| key.clone())
        .collect()
    }))
  }

  async fn log_interaction(
    &self,
    question: String,
    answer: String,
  ) -> Result<Interaction, Infallible> {
    let interaction = Interaction::new(question, answer);
    self.with(|k| k.interactions.push(interaction.clone()));
    Ok(interaction)
  }

  async fn interactions(&self) -> Result<Vec<Interaction>, Infallible> {
    Ok(self.with(|k| k.interactions.clone()))
  }

  async fn log_prediction(&self, line: String) -> Result<(), Infallible> {
    self.with(|k| k.predictions.push(line));
    Ok(())
  }

  async fn predictions(
    &self,
    limit: Option<usize>,
  ) -> Result<Vec<String>, Infallible> {
    Ok(self.with(|k| {
      let skip = limit.map_or(0, |n| k.predictions.len().saturating_sub(n));
      k.predictions[skip..].to_vec()
    }))
  }
}

// ─── Sports ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StubSports {
  pub teams:     Vec<TeamInfo>,
  pub live:      Vec<LiveMatch>,
  pub countries: Vec<Country>,
  pub leagues:   Vec<League>,
  pub lookups:   Mutex<Vec<String>>,
}

impl SportsData for StubSports {
  async fn find_team(&self, name: &str) -> Option<TeamInfo> {
    self
      .lookups
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(name.to_string());
    self.teams.iter().find(|t| fold(&t.name) == fold(name)).cloned()
  }

  async fn live_matches(&self) -> Vec<LiveMatch> { self.live.clone() }

  async fn countries(&self) -> Vec<Country> { self.countries.clone() }

  async fn leagues(&self, country: &str) -> Vec<League> {
    self
      .leagues
      .iter()
      .filter(|l| l.country.as_deref() == Some(country))
      .cloned()
      .collect()
  }

  async fn teams(&self, league_id: i64) -> Vec<TeamSummary> {
    if league_id == 0 {
      return Vec::new();
    }
    self
      .teams
      .iter()
      .map(|t| TeamSummary {
        id:   t.id,
        name: t.name.clone(),
      })
      .collect()
  }
}

// ─── Encyclopedia ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StubWiki {
  /// Search term → titles.
  pub results:  HashMap<String, Vec<String>>,
  pub pages:    HashMap<String, PageSummary>,
  pub searches: Mutex<Vec<String>>,
}

impl StubWiki {
  pub fn with_page(
    mut self,
    title: &str,
    description: &str,
    extract: &str,
  ) -> Self {
    self.pages.insert(title.to_string(), PageSummary {
      title:       title.to_string(),
      description: Some(description.to_string()),
      extract:     Some(extract.to_string()),
    });
    self
  }

  pub fn with_results(mut self, term: &str, titles: &[&str]) -> Self {
    self
      .results
      .insert(term.to_string(), titles.iter().map(|t| t.to_string()).collect());
    self
  }

  pub fn search_count(&self) -> usize {
    self.searches.lock().unwrap_or_else(PoisonError::into_inner).len()
  }
}

impl Encyclopedia for StubWiki {
  async fn search(&self, term: &str) -> Vec<String> {
    self
      .searches
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(term.to_string());
    self.results.get(term).cloned().unwrap_or_default()
  }

  async fn summary(&self, title: &str) -> Option<PageSummary> {
    self.pages.get(title).cloned()
  }
}
