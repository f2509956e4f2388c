//! Baseline team strengths.

use std::collections::BTreeMap;

use crate::team::fold;

/// Strength assigned to any team missing from the table.
pub const DEFAULT_TEAM_STRENGTH: i32 = 75;

const REFERENCE_STRENGTHS: &[(&str, i32)] = &[
  ("real madrid", 90),
  ("barcelona", 88),
  ("psg", 85),
  ("manchester united", 87),
  ("manchester city", 92),
  ("chelsea", 80),
  ("liverpool", 86),
  ("arsenal", 83),
  ("bayern munich", 90),
  ("juventus", 84),
  ("inter milan", 82),
  ("ac milan", 81),
  ("napoli", 80),
  ("marseille", 78),
  ("ajax", 79),
  ("benfica", 77),
  ("porto", 76),
];

/// Immutable mapping from folded team name to baseline strength.
#[derive(Debug, Clone)]
pub struct StrengthTable {
  entries: BTreeMap<String, i32>,
  default: i32,
}

impl StrengthTable {
  pub fn new<N: AsRef<str>>(
    entries: impl IntoIterator<Item = (N, i32)>,
    default: i32,
  ) -> Self {
    Self {
      entries: entries
        .into_iter()
        .map(|(name, strength)| (fold(name.as_ref()), strength))
        .collect(),
      default,
    }
  }

  /// The reference table, with a caller-chosen default for unknown teams.
  pub fn reference(default: i32) -> Self {
    Self::new(REFERENCE_STRENGTHS.iter().copied(), default)
  }

  /// Strength of `name`. Never fails: unknown names get the default.
  pub fn strength_of(&self, name: &str) -> i32 {
    self.entries.get(&fold(name)).copied().unwrap_or(self.default)
  }

  pub fn default_strength(&self) -> i32 { self.default }

  /// Folded names of every team in the table.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }
}

impl Default for StrengthTable {
  fn default() -> Self { Self::reference(DEFAULT_TEAM_STRENGTH) }
}
