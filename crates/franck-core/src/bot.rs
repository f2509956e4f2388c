//! The dispatcher — routes each message to a handler and always answers.
//!
//! Every handler resolves to a string. Collaborator failures are logged and
//! fall through to the next tier; nothing here returns an error to the user.

use std::{
  future::Future,
  sync::{PoisonError, RwLock},
};

use crate::{
  engine::PredictionEngine,
  history::MatchHistory,
  intent::{Intent, IntentClassifier, KeywordClassifier},
  knowledge::{Answer, ClubProfile, KnowledgeStore},
  sources::{Encyclopedia, SportsData, football_title},
  statistics::StatisticTable,
  team::{Fixture, fold, title_case},
};

pub const FAREWELL: &str = "Merci d'avoir utilisé FranckAI ⚽ À bientôt !";
pub const NO_INFORMATION: &str = "Je ne sais pas. Essaye d'être plus précis.";
pub const NO_PREDICTIONS: &str = "Aucune prédiction enregistrée.";

/// Common spellings mapped to the name the data providers know.
const CLUB_TRANSLATIONS: &[(&str, &str)] = &[
  ("barcelone", "barcelona"),
  ("réal madrid", "real madrid"),
  ("psg", "paris saint-germain"),
  ("bayern", "bayern munich"),
];

// ─── Responder ───────────────────────────────────────────────────────────────

/// What the HTTP layer needs from a chatbot.
pub trait Responder: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Answer a free-text message. Never fails.
  fn respond<'a>(
    &'a self,
    message: &'a str,
  ) -> impl Future<Output = String> + Send + 'a;

  /// The cached answer for `question`, if any.
  fn cached<'a>(
    &'a self,
    question: &'a str,
  ) -> impl Future<Output = Result<Option<Answer>, Self::Error>> + Send + 'a;

  /// Replace the answer to `question` and validate matching interactions.
  fn correct<'a>(
    &'a self,
    question: &'a str,
    answer: String,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// The last `limit` predictions (all if `None`).
  fn predictions(
    &self,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}

// ─── Dispatcher ──────────────────────────────────────────────────────────────

pub struct Dispatcher<K, S, W, H> {
  knowledge:  K,
  sports:     S,
  wiki:       W,
  engine:     PredictionEngine<H>,
  statistics: StatisticTable,
  classifier: Box<dyn IntentClassifier>,
  /// Folded club names recognised in free text.
  clubs:      RwLock<Vec<String>>,
}

impl<K, S, W, H> Dispatcher<K, S, W, H>
where
  K: KnowledgeStore,
  S: SportsData,
  W: Encyclopedia,
  H: MatchHistory,
{
  pub fn new(
    knowledge: K,
    sports: S,
    wiki: W,
    engine: PredictionEngine<H>,
  ) -> Self {
    let clubs = engine.strengths().names().map(str::to_string).collect();
    Self {
      knowledge,
      sports,
      wiki,
      engine,
      statistics: StatisticTable,
      classifier: Box::new(KeywordClassifier),
      clubs: RwLock::new(clubs),
    }
  }

  pub fn with_classifier(
    mut self,
    classifier: impl IntentClassifier + 'static,
  ) -> Self {
    self.classifier = Box::new(classifier);
    self
  }

  /// Make every club profile already in the store recognisable in free
  /// text. Returns how many clubs the store knows.
  pub async fn load_known_clubs(&self) -> Result<usize, K::Error> {
    let names = self.knowledge.club_names().await?;
    let count = names.len();
    for name in names {
      self.remember_club(fold(&name));
    }
    tracing::info!(clubs = count, "loaded learned clubs");
    Ok(count)
  }

  pub fn knowledge(&self) -> &K { &self.knowledge }

  async fn route(&self, message: &str) -> String {
    let intent = self.classifier.classify(message);
    tracing::debug!(?intent, "classified message");

    match intent {
      Intent::Quit => FAREWELL.to_string(),
      Intent::Malformed(hint) => hint,
      Intent::LearnClub(club) => self.learn_club(&club).await,
      Intent::Correction { question, answer } => {
        match self.knowledge.correct(&question, Answer::from(answer)).await {
          Ok(n) => {
            format!("Merci ! Réponse corrigée ({n} échange(s) validé(s)).")
          }
          Err(e) => {
            tracing::error!(error = %e, "failed to apply correction");
            "Impossible d'enregistrer la correction pour le moment.".to_string()
          }
        }
      }
      Intent::History(limit) => self.prediction_history(limit).await,
      Intent::Match(fixture) => self.analyse_match(fixture).await,
      Intent::ScoreProjection(fixture) => self.project_match(fixture).await,
      Intent::LiveScores => self.live_scores().await,
      Intent::CountryList => self.country_list().await,
      Intent::LeagueList(country) => self.league_list(&country).await,
      Intent::TeamList(league_id) => self.team_list(league_id).await,
      Intent::Statistic => match self.statistics.lookup(message) {
        Some(answer) => answer.to_string(),
        None => self
          .wikipedia_answer(message)
          .await
          .unwrap_or_else(|| NO_INFORMATION.to_string()),
      },
      Intent::General => self.general(message).await,
    }
  }

  // ── Free text ─────────────────────────────────────────────────────────

  /// Cache → known club → Wikipedia → default.
  async fn general(&self, message: &str) -> String {
    match self.knowledge.get(message).await {
      Ok(Some(answer)) => return answer.text().to_string(),
      Ok(None) => {}
      Err(e) => tracing::warn!(error = %e, "knowledge lookup failed"),
    }

    if let Some(club) = self.mentioned_club(message) {
      return self.club_answer(&club).await;
    }

    self
      .wikipedia_answer(message)
      .await
      .unwrap_or_else(|| NO_INFORMATION.to_string())
  }

  fn mentioned_club(&self, message: &str) -> Option<String> {
    let message = message.to_lowercase();
    let clubs = self.clubs.read().unwrap_or_else(PoisonError::into_inner);
    clubs
      .iter()
      .filter(|club| message.contains(club.as_str()))
      .max_by_key(|club| club.len())
      .cloned()
  }

  fn remember_club(&self, club: String) {
    let mut clubs = self.clubs.write().unwrap_or_else(PoisonError::into_inner);
    if !clubs.contains(&club) {
      clubs.push(club);
    }
  }

  /// Search Wikipedia with a few variations of `message`, preferring
  /// football-looking titles. A hit is written through to the cache.
  async fn wikipedia_answer(&self, message: &str) -> Option<String> {
    let terms = [
      format!("{message} football"),
      format!("football {message}"),
      format!("club de {message}"),
      message.to_string(),
    ];

    let mut top_result = None;
    for term in &terms {
      let titles = self.wiki.search(term).await;
      tracing::debug!(term = %term, hits = titles.len(), "wikipedia search");
      if let Some(title) = football_title(&titles)
        && let Some(page) = self.wiki.summary(title).await
      {
        return Some(self.remember_answer(message, page.quote()).await);
      }
      if top_result.is_none() {
        top_result = titles.into_iter().next();
      }
    }

    let title = top_result?;
    let page = self.wiki.summary(&title).await?;
    Some(self.remember_answer(message, page.quote()).await)
  }

  async fn remember_answer(&self, question: &str, text: String) -> String {
    let answer = Answer::from(text.clone());
    if let Err(e) = self.knowledge.put(question, answer).await {
      tracing::warn!(error = %e, "failed to cache answer");
    }
    text
  }

  // ── Clubs ─────────────────────────────────────────────────────────────

  async fn club_answer(&self, club: &str) -> String {
    match self.knowledge.get(club).await {
      Ok(Some(answer)) => return answer.text().to_string(),
      Ok(None) => {}
      Err(e) => tracing::warn!(error = %e, club, "knowledge lookup failed"),
    }
    self.lookup_club(club).await.unwrap_or_else(|| {
      format!("Je n'ai trouvé aucune info fiable sur '{club}'.")
    })
  }

  async fn learn_club(&self, club: &str) -> String {
    match self.knowledge.get(club).await {
      Ok(Some(answer)) => {
        self.remember_club(fold(club));
        return format!(
          "Je connais déjà {club}. Voici ce que je sais : {}",
          answer.text()
        );
      }
      Ok(None) => {}
      Err(e) => tracing::warn!(error = %e, club, "knowledge lookup failed"),
    }

    match self.lookup_club(club).await {
      Some(description) => {
        self.remember_club(fold(club));
        description
      }
      None => format!("Je n'ai trouvé aucune info fiable sur '{club}'."),
    }
  }

  /// Look a club up online and store its profile under `club`.
  async fn lookup_club(&self, club: &str) -> Option<String> {
    let folded = fold(club);
    let name = CLUB_TRANSLATIONS
      .iter()
      .find(|(alias, _)| *alias == folded)
      .map_or(club, |(_, canonical)| *canonical);

    let description = match self.sports.find_team(name).await {
      Some(info) => info.describe(),
      None => self.wikipedia_club(name).await?,
    };

    let profile = ClubProfile::from_definition(description.clone());
    if let Err(e) = self.knowledge.put(club, profile.into()).await {
      tracing::warn!(error = %e, club, "failed to store club profile");
    }
    tracing::info!(club, "learned club");
    Some(description)
  }

  async fn wikipedia_club(&self, name: &str) -> Option<String> {
    let title = title_case(name);
    let candidates = [
      format!("FC {title}"),
      format!("{title} FC"),
      format!("Futbol Club {title}"),
      format!("{title} (football)"),
      format!("{title} football club"),
      format!("Club de {title}"),
      title.clone(),
    ];

    for candidate in &candidates {
      match self.wiki.summary(candidate).await {
        Some(page) if page.is_about_football() => return Some(page.quote()),
        Some(_) => {
          tracing::debug!(candidate = %candidate, "page is not about football")
        }
        None => {}
      }
    }

    let titles = self.wiki.search(&format!("{name} football")).await;
    let title = football_title(&titles)?;
    self.wiki.summary(title).await.map(|page| page.quote())
  }

  // ── Predictions ───────────────────────────────────────────────────────

  async fn resolve(&self, mut fixture: Fixture) -> Fixture {
    for team in [&mut fixture.team_a, &mut fixture.team_b] {
      team.id = self.sports.find_team(&team.name).await.map(|t| t.id);
    }
    fixture
  }

  async fn analyse_match(&self, fixture: Fixture) -> String {
    let fixture = self.resolve(fixture).await;
    let verdict = self.engine.compare(&fixture).await.to_string();
    self.log_prediction(&fixture, &verdict).await;
    verdict
  }

  async fn project_match(&self, fixture: Fixture) -> String {
    let fixture = self.resolve(fixture).await;
    let projection = self.engine.project_score(&fixture).await.to_string();
    self.log_prediction(&fixture, &projection).await;
    projection
  }

  async fn log_prediction(&self, fixture: &Fixture, verdict: &str) {
    let line = format!(
      "{} vs {} → {verdict}",
      fixture.team_a.name, fixture.team_b.name
    );
    if let Err(e) = self.knowledge.log_prediction(line).await {
      tracing::warn!(error = %e, "failed to log prediction");
    }
  }

  async fn prediction_history(&self, limit: Option<usize>) -> String {
    match self.knowledge.predictions(limit).await {
      Ok(lines) if lines.is_empty() => NO_PREDICTIONS.to_string(),
      Ok(lines) => lines.join("\n"),
      Err(e) => {
        tracing::warn!(error = %e, "failed to read prediction log");
        NO_PREDICTIONS.to_string()
      }
    }
  }

  // ── Live data ─────────────────────────────────────────────────────────

  async fn live_scores(&self) -> String {
    let matches = self.sports.live_matches().await;
    if matches.is_empty() {
      return "Aucun match en direct pour le moment.".to_string();
    }
    let lines: Vec<String> = matches
      .iter()
      .map(|m| {
        let league = m
          .league
          .as_deref()
          .map(|l| format!(" [{l}]"))
          .unwrap_or_default();
        format!(
          "⚽ {} {} {} ({}){league}",
          m.home_team, m.score, m.away_team, m.status
        )
      })
      .collect();
    lines.join("\n")
  }

  async fn country_list(&self) -> String {
    let countries = self.sports.countries().await;
    if countries.is_empty() {
      return "Impossible de récupérer la liste des pays.".to_string();
    }
    let names: Vec<&str> = countries.iter().map(|c| c.name.as_str()).collect();
    format!("🌍 Pays disponibles : {}", names.join(", "))
  }

  async fn league_list(&self, country: &str) -> String {
    let leagues = self.sports.leagues(country).await;
    if leagues.is_empty() {
      return format!("Aucune ligue trouvée pour {country}.");
    }
    let names: Vec<String> =
      leagues.iter().map(|l| format!("{} (#{})", l.name, l.id)).collect();
    format!("🏆 Ligues en {country} : {}", names.join(", "))
  }

  async fn team_list(&self, league_id: i64) -> String {
    let teams = self.sports.teams(league_id).await;
    if teams.is_empty() {
      return format!("Aucune équipe trouvée pour la ligue {league_id}.");
    }
    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    format!("👥 Équipes de la ligue {league_id} : {}", names.join(", "))
  }
}

impl<K, S, W, H> Responder for Dispatcher<K, S, W, H>
where
  K: KnowledgeStore,
  S: SportsData,
  W: Encyclopedia,
  H: MatchHistory,
{
  type Error = K::Error;

  async fn respond(&self, message: &str) -> String {
    let message = message.trim();
    let reply = self.route(message).await;
    if let Err(e) = self
      .knowledge
      .log_interaction(message.to_string(), reply.clone())
      .await
    {
      tracing::warn!(error = %e, "failed to log interaction");
    }
    reply
  }

  async fn cached(&self, question: &str) -> Result<Option<Answer>, K::Error> {
    self.knowledge.get(question).await
  }

  async fn correct(
    &self,
    question: &str,
    answer: String,
  ) -> Result<usize, K::Error> {
    self.knowledge.correct(question, Answer::from(answer)).await
  }

  async fn predictions(
    &self,
    limit: Option<usize>,
  ) -> Result<Vec<String>, K::Error> {
    self.knowledge.predictions(limit).await
  }
}

#[cfg(test)]
mod tests;
