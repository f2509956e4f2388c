//! The `MatchHistory` trait and the simulated reference tables.
//!
//! Form and head-to-head bonuses are derived in [`crate::form`] and
//! [`crate::head_to_head`]; this module only supplies the raw results.

use std::{collections::HashMap, future::Future};

use crate::{
  form::{Outcome, TeamForm},
  head_to_head::{HeadToHead, MeetingResult},
  team::{TeamRef, fold},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Source of past results.
///
/// `None` means "no data" — the caller substitutes a neutral history. Lookup
/// failures in a live implementation must be reported the same way.
pub trait MatchHistory: Send + Sync {
  /// Results for `team`, oldest first.
  fn recent_form<'a>(
    &'a self,
    team: &'a TeamRef,
  ) -> impl Future<Output = Option<TeamForm>> + Send + 'a;

  /// Meetings between `a` and `b`, oriented so that `team_a` is `a`
  /// regardless of the order the record was stored in.
  fn head_to_head<'a>(
    &'a self,
    a: &'a TeamRef,
    b: &'a TeamRef,
  ) -> impl Future<Output = Option<HeadToHead>> + Send + 'a;
}

// ─── Simulated tables ────────────────────────────────────────────────────────

/// In-memory history keyed by folded team name.
#[derive(Debug, Clone, Default)]
pub struct SimulatedHistory {
  forms:    HashMap<String, TeamForm>,
  meetings: Vec<HeadToHead>,
}

impl SimulatedHistory {
  /// An empty history: every lookup yields `None`.
  pub fn new() -> Self { Self::default() }

  /// The built-in sample data for seven clubs and six pairings.
  pub fn reference() -> Self {
    use MeetingResult::{Draw as Tie, TeamA as First, TeamB as Second};
    use Outcome::*;

    Self::new()
      .with_form(TeamForm::new("Real Madrid", vec![Win, Win, Draw, Win, Win]))
      .with_form(TeamForm::new("Barcelona", vec![Loss, Win, Win, Draw, Win]))
      .with_form(TeamForm::new("PSG", vec![Win, Loss, Win, Win, Draw]))
      .with_form(TeamForm::new("Manchester City", vec![
        Win, Win, Win, Win, Draw,
      ]))
      .with_form(TeamForm::new("Bayern Munich", vec![
        Loss, Win, Loss, Win, Win,
      ]))
      .with_form(TeamForm::new("Chelsea", vec![Loss, Loss, Draw, Win, Loss]))
      .with_form(TeamForm::new("Juventus", vec![Win, Draw, Win, Loss, Win]))
      .with_meeting(HeadToHead::new("Real Madrid", "Barcelona", vec![
        First, Second, First, Tie, First,
      ]))
      .with_meeting(HeadToHead::new("Real Madrid", "PSG", vec![
        First, Second, Tie,
      ]))
      .with_meeting(HeadToHead::new("Barcelona", "Manchester City", vec![
        Second, Second, Tie, First,
      ]))
      .with_meeting(HeadToHead::new("PSG", "Manchester City", vec![
        Second, Second, First,
      ]))
      .with_meeting(HeadToHead::new("Bayern Munich", "Chelsea", vec![
        First, Tie, First, Second,
      ]))
      .with_meeting(HeadToHead::new("Chelsea", "Juventus", vec![
        Tie, Second, First,
      ]))
  }

  /// Add or replace the form of `form.team_name`.
  pub fn with_form(mut self, form: TeamForm) -> Self {
    self.forms.insert(fold(&form.team_name), form);
    self
  }

  /// Add a head-to-head record. Records are matched in either order.
  pub fn with_meeting(mut self, meeting: HeadToHead) -> Self {
    self.meetings.push(meeting);
    self
  }

  fn find_meeting(&self, a: &str, b: &str) -> Option<HeadToHead> {
    self.meetings.iter().find_map(|m| {
      let (x, y) = (fold(&m.team_a), fold(&m.team_b));
      if x == a && y == b {
        Some(m.clone())
      } else if x == b && y == a {
        Some(m.reversed())
      } else {
        None
      }
    })
  }
}

impl MatchHistory for SimulatedHistory {
  async fn recent_form(&self, team: &TeamRef) -> Option<TeamForm> {
    self.forms.get(&team.key()).cloned()
  }

  async fn head_to_head(&self, a: &TeamRef, b: &TeamRef) -> Option<HeadToHead> {
    self.find_meeting(&a.key(), &b.key())
  }
}
