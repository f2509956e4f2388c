//! Team references and fixtures.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Identifier assigned to a team by the sports-data provider.
pub type TeamId = i64;

/// Case-fold and trim a team name for table lookups.
pub fn fold(name: &str) -> String { name.trim().to_lowercase() }

/// Capitalise every whitespace-separated word, lowercasing the rest.
pub fn title_case(name: &str) -> String {
  name
    .split_whitespace()
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => first
          .to_uppercase()
          .chain(chars.flat_map(char::to_lowercase))
          .collect(),
        None => String::new(),
      }
    })
    .collect::<Vec<String>>()
    .join(" ")
}

/// A team as typed by the user, plus the provider id if it could be resolved.
///
/// An unresolved id is not an error: every lookup keyed on it falls back to
/// neutral values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
  pub name: String,
  pub id:   Option<TeamId>,
}

impl TeamRef {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      id:   None,
    }
  }

  pub fn with_id(mut self, id: Option<TeamId>) -> Self {
    self.id = id;
    self
  }

  /// The folded name used as a lookup key.
  pub fn key(&self) -> String { fold(&self.name) }

  pub fn display_name(&self) -> String { title_case(&self.name) }
}

// ─── Fixture ─────────────────────────────────────────────────────────────────

/// Two teams to be compared, with an optional host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
  pub team_a: TeamRef,
  pub team_b: TeamRef,
  /// Name of the hosting team. Ignored if it matches neither side.
  pub home:   Option<String>,
}

impl Fixture {
  pub fn new(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
    Self {
      team_a: TeamRef::named(team_a),
      team_b: TeamRef::named(team_b),
      home:   None,
    }
  }

  pub fn hosted_by(mut self, home: impl Into<String>) -> Self {
    self.home = Some(home.into());
    self
  }

  /// Parse `"<A> vs <B>"`, optionally suffixed with `"@ <host>"`.
  ///
  /// The separator is matched case-insensitively and must appear exactly
  /// once.
  pub fn parse(text: &str) -> Result<Self> {
    let separators = find_versus(text);
    let at = match separators.as_slice() {
      [] => return Err(Error::MissingVersus),
      [at] => *at,
      _ => return Err(Error::TooManyVersus),
    };

    let team_a = text[..at].trim();
    let rest = &text[at + VERSUS.len()..];
    let (team_b, home) = match rest.split_once(" @ ") {
      Some((team, home)) => (team.trim(), Some(home.trim())),
      None => (rest.trim(), None),
    };

    if team_a.is_empty() || team_b.is_empty() {
      return Err(Error::EmptyTeam);
    }

    let mut fixture = Self::new(team_a, team_b);
    if let Some(home) = home.filter(|h| !h.is_empty()) {
      fixture = fixture.hosted_by(home);
    }
    Ok(fixture)
  }
}

const VERSUS: &str = " vs ";

/// Returns `true` if `text` contains the `" vs "` separator in any case.
pub fn mentions_versus(text: &str) -> bool { !find_versus(text).is_empty() }

fn find_versus(text: &str) -> Vec<usize> {
  // The separator is pure ASCII, so every match starts on a char boundary.
  text
    .as_bytes()
    .windows(VERSUS.len())
    .enumerate()
    .filter(|(_, w)| w.eq_ignore_ascii_case(VERSUS.as_bytes()))
    .map(|(i, _)| i)
    .collect()
}
