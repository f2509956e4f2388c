//! Head-to-head history between two specific teams.

use serde::{Deserialize, Serialize};

use crate::{history::MatchHistory, team::TeamRef};

/// Result of one meeting, relative to the record's `team_a`/`team_b` order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
pub enum MeetingResult {
  #[serde(rename = "Team1")]
  #[strum(serialize = "Team1")]
  TeamA,
  #[serde(rename = "Team2")]
  #[strum(serialize = "Team2")]
  TeamB,
  Draw,
}

impl MeetingResult {
  fn flipped(self) -> Self {
    match self {
      Self::TeamA => Self::TeamB,
      Self::TeamB => Self::TeamA,
      Self::Draw => Self::Draw,
    }
  }
}

/// The meetings between two teams, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
  pub team_a:  String,
  pub team_b:  String,
  pub results: Vec<MeetingResult>,
}

impl HeadToHead {
  pub fn new(
    team_a: impl Into<String>,
    team_b: impl Into<String>,
    results: Vec<MeetingResult>,
  ) -> Self {
    Self {
      team_a: team_a.into(),
      team_b: team_b.into(),
      results,
    }
  }

  /// Stand-in record for pairs that never met: two draws.
  pub fn neutral(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
    Self::new(team_a, team_b, vec![MeetingResult::Draw; 2])
  }

  /// The same history seen from the other side.
  pub fn reversed(&self) -> Self {
    Self {
      team_a:  self.team_b.clone(),
      team_b:  self.team_a.clone(),
      results: self.results.iter().map(|r| r.flipped()).collect(),
    }
  }

  pub fn record(&self) -> HeadToHeadRecord {
    let count = |wanted: MeetingResult| {
      self.results.iter().filter(|r| **r == wanted).count()
    };
    HeadToHeadRecord {
      team_a:      self.team_a.clone(),
      team_b:      self.team_b.clone(),
      team_a_wins: count(MeetingResult::TeamA),
      team_b_wins: count(MeetingResult::TeamB),
      draws:       count(MeetingResult::Draw),
      total:       self.results.len(),
    }
  }

  pub fn summary(&self) -> HeadToHeadSummary {
    let record = self.record();
    HeadToHeadSummary {
      bonus_a: head_to_head_bonus(record.team_a_wins, record.total),
      bonus_b: head_to_head_bonus(record.team_b_wins, record.total),
      record,
    }
  }
}

/// Tally of a [`HeadToHead`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHeadRecord {
  pub team_a:      String,
  pub team_b:      String,
  pub team_a_wins: usize,
  pub team_b_wins: usize,
  pub draws:       usize,
  pub total:       usize,
}

impl HeadToHeadRecord {
  pub fn win_rate_a(&self) -> f64 { win_rate(self.team_a_wins, self.total) }

  pub fn win_rate_b(&self) -> f64 { win_rate(self.team_b_wins, self.total) }
}

/// Bonuses for both sides of a meeting, in query order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHeadSummary {
  pub bonus_a: i32,
  pub bonus_b: i32,
  pub record:  HeadToHeadRecord,
}

fn win_rate(wins: usize, total: usize) -> f64 {
  if total == 0 { 0.0 } else { wins as f64 / total as f64 }
}

/// Bonus for a side that won `wins` of `total` meetings.
///
/// Thresholds are strict: a win rate of exactly 0.6 earns 2, not 4. The
/// comparison is done on integers so that boundary holds exactly.
pub fn head_to_head_bonus(wins: usize, total: usize) -> i32 {
  if total == 0 {
    0
  } else if wins * 5 > total * 3 {
    4
  } else if wins * 5 > total * 2 {
    2
  } else {
    0
  }
}

/// Head-to-head between `a` and `b`, with `bonus_a` belonging to `a`.
/// Falls back to the neutral record when the history has nothing.
pub async fn head_to_head<H>(
  history: &H,
  a: &TeamRef,
  b: &TeamRef,
) -> HeadToHeadSummary
where
  H: MatchHistory + ?Sized,
{
  match history.head_to_head(a, b).await {
    Some(meetings) => meetings.summary(),
    None => {
      tracing::debug!(
        a = %a.name,
        b = %b.name,
        "no recorded meetings, using neutral record"
      );
      HeadToHead::neutral(&a.name, &b.name).summary()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{MeetingResult::*, *};

  fn classico() -> HeadToHead {
    HeadToHead::new("Real Madrid", "Barcelona", vec![
      TeamA, TeamB, TeamA, Draw, TeamA,
    ])
  }

  #[test]
  fn sixty_percent_is_not_above_the_top_threshold() {
    let summary = classico().summary();
    assert_eq!(summary.record.win_rate_a(), 0.6);
    assert_eq!(summary.bonus_a, 2);
    assert_eq!(summary.bonus_b, 0);
  }

  #[test]
  fn bonus_thresholds_are_strict() {
    assert_eq!(head_to_head_bonus(0, 0), 0);
    assert_eq!(head_to_head_bonus(2, 5), 0);
    assert_eq!(head_to_head_bonus(1, 2), 2);
    assert_eq!(head_to_head_bonus(3, 5), 2);
    assert_eq!(head_to_head_bonus(2, 3), 4);
    assert_eq!(head_to_head_bonus(4, 4), 4);
  }

  #[test]
  fn reversal_swaps_sides_and_bonuses() {
    let forward = classico().summary();
    let backward = classico().reversed().summary();
    assert_eq!(backward.bonus_a, forward.bonus_b);
    assert_eq!(backward.bonus_b, forward.bonus_a);
    assert_eq!(backward.record.team_a, "Barcelona");
    assert_eq!(backward.record.team_b_wins, 3);
    assert_eq!(backward.record.draws, 1);
  }

  #[test]
  fn record_counts_every_result() {
    let record = classico().record();
    assert_eq!(record.team_a_wins, 3);
    assert_eq!(record.team_b_wins, 1);
    assert_eq!(record.draws, 1);
    assert_eq!(record.total, 5);
  }

  #[test]
  fn neutral_record_gives_no_bonus() {
    let summary = HeadToHead::neutral("Team_A", "Team_B").summary();
    assert_eq!(summary.record.draws, 2);
    assert_eq!((summary.bonus_a, summary.bonus_b), (0, 0));
  }

  #[test]
  fn empty_record_has_zero_win_rate() {
    let record = HeadToHead::new("A", "B", vec![]).record();
    assert_eq!(record.win_rate_a(), 0.0);
    assert_eq!(record.win_rate_b(), 0.0);
  }
}
