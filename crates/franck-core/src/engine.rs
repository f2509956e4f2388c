//! Match scoring engine.
//!
//! Both modes accumulate the same total per side:
//!
//! ```text
//! total = base strength + home bonus (host only) + form bonus + head-to-head bonus
//! ```
//!
//! [`PredictionEngine::compare`] turns the totals into a deterministic
//! verdict. [`PredictionEngine::project_score`] maps them to goals and adds
//! one unit of noise per side from the injected random source.

use std::{
  fmt,
  sync::{Mutex, PoisonError},
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
  form::{FormSummary, form_of},
  head_to_head::{HeadToHeadSummary, head_to_head},
  history::MatchHistory,
  strength::StrengthTable,
  team::{Fixture, fold},
};

/// Bonus added to the host's strength.
pub const HOME_ADVANTAGE_BONUS: i32 = 3;

/// Strength that projects to 1.5 goals before rounding.
const GOALS_REFERENCE_STRENGTH: f64 = 80.0;
const GOALS_AT_REFERENCE: f64 = 1.5;

// ─── Results ─────────────────────────────────────────────────────────────────

/// Everything that went into a pair of totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRatings {
  pub total_a:      i32,
  pub total_b:      i32,
  pub form_a:       FormSummary,
  pub form_b:       FormSummary,
  pub head_to_head: HeadToHeadSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Favored {
  TeamA,
  TeamB,
  Balanced,
}

/// Outcome of comparative mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
  pub team_a:  String,
  pub team_b:  String,
  pub total_a: i32,
  pub total_b: i32,
  pub favored: Favored,
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.favored {
      Favored::TeamA => write!(
        f,
        "📊 Analyse: {} est favori ({} vs {})",
        self.team_a, self.total_a, self.total_b
      ),
      Favored::TeamB => write!(
        f,
        "📊 Analyse: {} est favori ({} vs {})",
        self.team_b, self.total_b, self.total_a
      ),
      Favored::Balanced => write!(
        f,
        "📊 Analyse: Match équilibré ({} vs {})",
        self.total_a, self.total_b
      ),
    }
  }
}

/// Outcome of score-projection mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreProjection {
  pub team_a:    String,
  pub team_b:    String,
  pub score_a:   u32,
  pub score_b:   u32,
  pub rationale: String,
}

impl fmt::Display for ScoreProjection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "🔮 Pronostic: {} {} - {} {}. {}",
      self.team_a, self.score_a, self.score_b, self.team_b, self.rationale
    )
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

pub struct PredictionEngine<H> {
  strengths:  StrengthTable,
  history:    H,
  home_bonus: i32,
  rng:        Mutex<StdRng>,
}

impl<H: MatchHistory> PredictionEngine<H> {
  pub fn new(strengths: StrengthTable, history: H, rng: StdRng) -> Self {
    Self {
      strengths,
      history,
      home_bonus: HOME_ADVANTAGE_BONUS,
      rng: Mutex::new(rng),
    }
  }

  /// An engine whose score projections are reproducible.
  pub fn seeded(strengths: StrengthTable, history: H, seed: u64) -> Self {
    Self::new(strengths, history, StdRng::seed_from_u64(seed))
  }

  pub fn with_home_bonus(mut self, home_bonus: i32) -> Self {
    self.home_bonus = home_bonus;
    self
  }

  pub fn strengths(&self) -> &StrengthTable { &self.strengths }

  /// Compute both totals for `fixture`.
  pub async fn rate(&self, fixture: &Fixture) -> MatchRatings {
    let (a, b) = (&fixture.team_a, &fixture.team_b);

    let mut total_a = self.strengths.strength_of(&a.name);
    let mut total_b = self.strengths.strength_of(&b.name);

    if let Some(home) = fixture.home.as_deref().map(fold) {
      if home == a.key() {
        total_a += self.home_bonus;
      } else if home == b.key() {
        total_b += self.home_bonus;
      }
    }

    let form_a = form_of(&self.history, a).await;
    let form_b = form_of(&self.history, b).await;
    total_a += form_a.bonus;
    total_b += form_b.bonus;

    let h2h = head_to_head(&self.history, a, b).await;
    total_a += h2h.bonus_a;
    total_b += h2h.bonus_b;

    tracing::debug!(
      a = %a.name, b = %b.name, total_a, total_b,
      "rated fixture"
    );

    MatchRatings {
      total_a,
      total_b,
      form_a,
      form_b,
      head_to_head: h2h,
    }
  }

  /// Comparative mode. Deterministic for identical inputs.
  pub async fn compare(&self, fixture: &Fixture) -> Verdict {
    let ratings = self.rate(fixture).await;
    let favored = match ratings.total_a.cmp(&ratings.total_b) {
      std::cmp::Ordering::Greater => Favored::TeamA,
      std::cmp::Ordering::Less => Favored::TeamB,
      std::cmp::Ordering::Equal => Favored::Balanced,
    };
    Verdict {
      team_a: fixture.team_a.display_name(),
      team_b: fixture.team_b.display_name(),
      total_a: ratings.total_a,
      total_b: ratings.total_b,
      favored,
    }
  }

  /// Score-projection mode. Draws one noise value per side from the engine's
  /// random source.
  pub async fn project_score(&self, fixture: &Fixture) -> ScoreProjection {
    let ratings = self.rate(fixture).await;

    let (noise_a, noise_b) = {
      let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
      (rng.gen_range(-1..=1), rng.gen_range(-1..=1))
    };
    let score_a = perturb(expected_goals(ratings.total_a), noise_a);
    let score_b = perturb(expected_goals(ratings.total_b), noise_b);

    let team_a = fixture.team_a.display_name();
    let team_b = fixture.team_b.display_name();
    let rationale = rationale(&team_a, &team_b, score_a, score_b, &ratings);

    ScoreProjection {
      team_a,
      team_b,
      score_a,
      score_b,
      rationale,
    }
  }
}

/// Goals before noise: `round(max(0, strength / 80 * 1.5))`.
pub fn expected_goals(strength: i32) -> u32 {
  let goals =
    f64::from(strength) / GOALS_REFERENCE_STRENGTH * GOALS_AT_REFERENCE;
  goals.max(0.0).round() as u32
}

fn perturb(goals: u32, noise: i32) -> u32 {
  (goals as i32 + noise).max(0) as u32
}

fn rationale(
  team_a: &str,
  team_b: &str,
  score_a: u32,
  score_b: u32,
  ratings: &MatchRatings,
) -> String {
  let (leader, form) = match score_a.cmp(&score_b) {
    std::cmp::Ordering::Greater => (team_a, &ratings.form_a),
    std::cmp::Ordering::Less => (team_b, &ratings.form_b),
    std::cmp::Ordering::Equal => {
      return format!(
        "Match serré : les deux équipes se tiennent ({} vs {}).",
        ratings.total_a, ratings.total_b
      );
    }
  };
  format!(
    "{leader} domine par sa forme et son attaque (forme récente : {}).",
    form.last_5_display()
  )
}
