//! Intent classification.
//!
//! [`KeywordClassifier`] is a priority chain, not a statistical model: the
//! first rule that matches decides. Other classifiers can be plugged into the
//! dispatcher through [`IntentClassifier`].

use crate::{
  Error,
  team::{Fixture, mentions_versus},
};

/// What the user is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
  Quit,
  /// `ajoute club <name>`
  LearnClub(String),
  /// `corrige <question> => <answer>`
  Correction { question: String, answer: String },
  /// `historique [n]`; `n = 0` means everything
  History(Option<usize>),
  /// `<A> vs <B>`
  Match(Fixture),
  /// `score <A> vs <B>` / `pronostic <A> vs <B>`
  ScoreProjection(Fixture),
  LiveScores,
  CountryList,
  LeagueList(String),
  TeamList(i64),
  Statistic,
  General,
  /// The input looked like a command but was malformed. Carries the
  /// corrective message for the user.
  Malformed(String),
}

impl From<Error> for Intent {
  fn from(error: Error) -> Self { Self::Malformed(error.to_string()) }
}

pub trait IntentClassifier: Send + Sync {
  fn classify(&self, text: &str) -> Intent;
}

// ─── Keyword rules ───────────────────────────────────────────────────────────

const QUIT_WORDS: &[&str] = &["quitter", "exit", "stop"];

const LIVE_MARKERS: &[&str] =
  &["live scores", "scores en direct", "matchs en direct"];

const COUNTRY_MARKERS: &[&str] = &[
  "supported countries",
  "available countries",
  "pays disponibles",
  "pays supportés",
];

const LEAGUE_MARKERS: &[&str] =
  &["leagues in ", "ligues en ", "ligues de ", "ligues du ", "ligues d'"];

const TEAM_MARKERS: &[&str] = &["équipes de la ligue ", "teams in league "];

const STATISTIC_MARKERS: &[&str] =
  &["statistique", "record", "combien", "le plus de", "meilleur buteur"];

/// The default rule-based classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl IntentClassifier for KeywordClassifier {
  fn classify(&self, text: &str) -> Intent {
    let text = text.trim();
    let lower = text.to_lowercase();

    if QUIT_WORDS.contains(&lower.as_str()) {
      return Intent::Quit;
    }
    if let Some(club) = strip_command(text, "ajoute club") {
      return learn_club(club);
    }
    if let Some(rest) = strip_command(text, "corrige") {
      return correction(rest);
    }
    if let Some(rest) = strip_command(text, "historique") {
      return history(rest);
    }
    if let Some(rest) =
      strip_command(text, "score").or_else(|| strip_command(text, "pronostic"))
      && mentions_versus(rest)
    {
      return Fixture::parse(rest)
        .map_or_else(Intent::from, Intent::ScoreProjection);
    }
    if mentions_versus(text) {
      return Fixture::parse(text).map_or_else(Intent::from, Intent::Match);
    }

    if contains_any(&lower, LIVE_MARKERS) {
      return Intent::LiveScores;
    }
    if contains_any(&lower, COUNTRY_MARKERS) {
      return Intent::CountryList;
    }
    if let Some(country) = after_marker(text, LEAGUE_MARKERS) {
      let country = country.trim().trim_end_matches(['?', '!', '.']).trim();
      return if country.is_empty() {
        Error::MissingCountry.into()
      } else {
        Intent::LeagueList(country.to_string())
      };
    }
    if let Some(rest) = after_marker(&lower, TEAM_MARKERS) {
      let id = rest.trim().trim_end_matches(['?', '!', '.']).trim();
      return match id.parse() {
        Ok(id) => Intent::TeamList(id),
        Err(_) => Error::InvalidCount {
          example: "équipes de la ligue 152",
        }
        .into(),
      };
    }
    if contains_any(&lower, STATISTIC_MARKERS) {
      return Intent::Statistic;
    }

    Intent::General
  }
}

fn learn_club(club: &str) -> Intent {
  if club.is_empty() {
    Error::MissingClub.into()
  } else {
    Intent::LearnClub(club.to_string())
  }
}

fn correction(rest: &str) -> Intent {
  match rest.split_once("=>") {
    Some((question, answer))
      if !question.trim().is_empty() && !answer.trim().is_empty() =>
    {
      Intent::Correction {
        question: question.trim().to_string(),
        answer:   answer.trim().to_string(),
      }
    }
    _ => Error::MalformedCorrection.into(),
  }
}

fn history(rest: &str) -> Intent {
  if rest.is_empty() {
    return Intent::History(None);
  }
  match rest.parse() {
    Ok(0) => Intent::History(None),
    Ok(n) => Intent::History(Some(n)),
    Err(_) => Error::InvalidCount {
      example: "historique 5",
    }
    .into(),
  }
}

/// If `text` is `command` alone or `command` followed by whitespace, return
/// the trimmed remainder. The command is matched case-insensitively.
fn strip_command<'t>(text: &'t str, command: &str) -> Option<&'t str> {
  let head = text.get(..command.len())?;
  if !head.eq_ignore_ascii_case(command) {
    return None;
  }
  let rest = &text[command.len()..];
  if rest.is_empty() || rest.starts_with(char::is_whitespace) {
    Some(rest.trim())
  } else {
    None
  }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
  needles.iter().any(|n| haystack.contains(n))
}

/// Text following the first marker found, matched ASCII-case-insensitively.
fn after_marker<'t>(text: &'t str, markers: &[&str]) -> Option<&'t str> {
  markers.iter().find_map(|marker| {
    let marker = marker.as_bytes();
    text
      .as_bytes()
      .windows(marker.len())
      .position(|w| w.eq_ignore_ascii_case(marker))
      .map(|at| &text[at + marker.len()..])
  })
}
