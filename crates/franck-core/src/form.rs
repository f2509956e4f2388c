//! Recent form: a team's win/draw/loss history and the bonus derived
//! from it.

use serde::{Deserialize, Serialize};

use crate::{history::MatchHistory, team::TeamRef};

/// Number of results shown in a form summary. Display only: the performance
/// percentage is always computed over the full history.
pub const FORM_WINDOW: usize = 5;

/// The result of a single match from one team's point of view.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
pub enum Outcome {
  #[serde(rename = "W")]
  #[strum(serialize = "W")]
  Win,
  #[serde(rename = "D")]
  #[strum(serialize = "D")]
  Draw,
  #[serde(rename = "L")]
  #[strum(serialize = "L")]
  Loss,
}

/// A team's results, ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamForm {
  pub team_name: String,
  pub results:   Vec<Outcome>,
}

impl TeamForm {
  pub fn new(team_name: impl Into<String>, results: Vec<Outcome>) -> Self {
    Self {
      team_name: team_name.into(),
      results,
    }
  }

  /// Stand-in history for teams with no recorded results: three draws.
  pub fn neutral(team_name: impl Into<String>) -> Self {
    Self::new(team_name, vec![Outcome::Draw; 3])
  }

  pub fn push(&mut self, outcome: Outcome) { self.results.push(outcome); }

  /// The most recent `n` results (fewer if the history is shorter).
  pub fn last_n(&self, n: usize) -> &[Outcome] {
    let start = self.results.len().saturating_sub(n);
    &self.results[start..]
  }

  /// Share of wins over the whole history, in percent. `0.0` when empty.
  pub fn performance_percent(&self) -> f64 {
    if self.results.is_empty() {
      return 0.0;
    }
    let wins = self.results.iter().filter(|o| **o == Outcome::Win).count();
    (wins as f64 * 100.0) / self.results.len() as f64
  }

  pub fn bonus(&self) -> i32 { form_bonus(self.performance_percent()) }

  pub fn summary(&self) -> FormSummary {
    FormSummary {
      team_name:           self.team_name.clone(),
      last_5:              self.last_n(FORM_WINDOW).to_vec(),
      performance_percent: self.performance_percent(),
      bonus:               self.bonus(),
    }
  }
}

/// Step function from win percentage to strength bonus. Lower bounds are
/// inclusive.
pub fn form_bonus(performance_percent: f64) -> i32 {
  if performance_percent >= 80.0 {
    5
  } else if performance_percent >= 60.0 {
    3
  } else if performance_percent >= 40.0 {
    1
  } else {
    0
  }
}

/// Derived view of a [`TeamForm`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
  pub team_name:           String,
  pub last_5:              Vec<Outcome>,
  pub performance_percent: f64,
  pub bonus:               i32,
}

impl FormSummary {
  /// `"W W D W W"`
  pub fn last_5_display(&self) -> String {
    self
      .last_5
      .iter()
      .map(Outcome::to_string)
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// Form of `team` according to `history`, or the neutral form if the
/// history has nothing for it.
pub async fn form_of<H>(history: &H, team: &TeamRef) -> FormSummary
where
  H: MatchHistory + ?Sized,
{
  match history.recent_form(team).await {
    Some(form) => form.summary(),
    None => {
      tracing::debug!(
        team = %team.name,
        "no recorded form, using neutral history"
      );
      TeamForm::neutral(&team.name).summary()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{Outcome::*, *};

  #[test]
  fn eighty_percent_reaches_the_top_tier() {
    let form = TeamForm::new("Real Madrid", vec![Win, Win, Draw, Win, Win]);
    assert_eq!(form.performance_percent(), 80.0);
    assert_eq!(form.bonus(), 5);
  }

  #[test]
  fn bonus_tiers_use_inclusive_lower_bounds() {
    assert_eq!(form_bonus(100.0), 5);
    assert_eq!(form_bonus(79.9), 3);
    assert_eq!(form_bonus(60.0), 3);
    assert_eq!(form_bonus(59.9), 1);
    assert_eq!(form_bonus(40.0), 1);
    assert_eq!(form_bonus(39.9), 0);
    assert_eq!(form_bonus(0.0), 0);
  }

  #[test]
  fn empty_history_scores_zero() {
    let form = TeamForm::new("Nobody", vec![]);
    assert_eq!(form.performance_percent(), 0.0);
    assert_eq!(form.bonus(), 0);
    assert!(form.last_n(FORM_WINDOW).is_empty());
  }

  #[test]
  fn percentage_covers_full_history_not_the_window() {
    // Seven results, last five all wins: 5/7 ≈ 71.4%, not 100%.
    let form =
      TeamForm::new("Streaky", vec![Loss, Loss, Win, Win, Win, Win, Win]);
    let summary = form.summary();
    assert_eq!(summary.last_5, vec![Win; 5]);
    assert!((summary.performance_percent - 500.0 / 7.0).abs() < 1e-9);
    assert_eq!(summary.bonus, 3);
  }

  #[test]
  fn neutral_form_is_three_draws() {
    let summary = TeamForm::neutral("Team_None").summary();
    assert_eq!(summary.last_5, vec![Draw, Draw, Draw]);
    assert_eq!(summary.performance_percent, 0.0);
    assert_eq!(summary.bonus, 0);
  }

  #[test]
  fn push_appends_newest_result() {
    let mut form = TeamForm::new("Ajax", vec![Loss, Loss, Loss, Loss, Loss]);
    form.push(Win);
    assert_eq!(form.last_n(1), &[Win]);
    assert_eq!(form.summary().last_5_display(), "L L L L W");
  }

  #[test]
  fn outcome_codes_serialise_as_letters() {
    assert_eq!(serde_json::to_string(&Win).unwrap(), "\"W\"");
    assert_eq!(Loss.to_string(), "L");
  }
}
