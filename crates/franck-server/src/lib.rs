//! Wiring for the FranckAI server: configuration, collaborators and the
//! HTTP application.

pub mod error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::Router;
use franck_core::{
  bot::Dispatcher,
  engine::{HOME_ADVANTAGE_BONUS, PredictionEngine},
  history::SimulatedHistory,
  strength::{DEFAULT_TEAM_STRENGTH, StrengthTable},
};
use franck_sources::{
  API_FOOTBALL_HOST, AllSportsClient, ApiFootballClient, DEFAULT_TIMEOUT,
  SPORTMONKS_BASE_URL, SportMonksClient, SportsHub, WIKIPEDIA_TIMEOUT,
  WikipediaClient,
};
use franck_store_json::JsonStore;
use rand::{SeedableRng as _, rngs::StdRng};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::{Error, Result};

/// The fully wired chatbot.
pub type FranckBot =
  Dispatcher<JsonStore, SportsHub, WikipediaClient, SimulatedHistory>;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FRANCK_*` environment variables. Every field has a default.
///
/// An absent or blank API key disables the matching provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                   String,
  pub port:                   u16,
  pub data_dir:               PathBuf,
  pub default_strength:       i32,
  pub home_advantage_bonus:   i32,
  pub wikipedia_lang:         String,
  pub allsports_api_key:      Option<String>,
  pub sportmonks_api_key:     Option<String>,
  pub sportmonks_base_url:    String,
  pub rapidapi_key:           Option<String>,
  pub rapidapi_host:          String,
  pub http_timeout_secs:      u64,
  pub wikipedia_timeout_secs: u64,
  /// Fixes the score-projection noise. Drawn from entropy if absent.
  pub rng_seed:               Option<u64>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                   "127.0.0.1".to_string(),
      port:                   5000,
      data_dir:               PathBuf::from("data"),
      default_strength:       DEFAULT_TEAM_STRENGTH,
      home_advantage_bonus:   HOME_ADVANTAGE_BONUS,
      wikipedia_lang:         "fr".to_string(),
      allsports_api_key:      None,
      sportmonks_api_key:     None,
      sportmonks_base_url:    SPORTMONKS_BASE_URL.to_string(),
      rapidapi_key:           None,
      rapidapi_host:          API_FOOTBALL_HOST.to_string(),
      http_timeout_secs:      DEFAULT_TIMEOUT.as_secs(),
      wikipedia_timeout_secs: WIKIPEDIA_TIMEOUT.as_secs(),
      rng_seed:               None,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  fn http_timeout(&self) -> Duration {
    Duration::from_secs(self.http_timeout_secs)
  }
}

/// A configured, non-blank key.
fn key(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

// ─── Wiring ──────────────────────────────────────────────────────────────────

/// Build the sports hub from whichever providers have keys.
pub fn sports_hub(cfg: &ServerConfig) -> Result<SportsHub> {
  let mut hub = SportsHub::new();

  if let Some(api_key) = key(&cfg.allsports_api_key) {
    let client = AllSportsClient::new(api_key, cfg.http_timeout())?;
    hub = hub.with_allsports(client);
  } else {
    tracing::warn!("no AllSportsAPI key, live data disabled");
  }

  if let Some(token) = key(&cfg.sportmonks_api_key) {
    let client = SportMonksClient::new(token, cfg.http_timeout())?
      .with_base_url(cfg.sportmonks_base_url.clone());
    hub = hub.with_sportmonks(client);
  }

  if let Some(api_key) = key(&cfg.rapidapi_key) {
    let client = ApiFootballClient::new(
      api_key,
      cfg.rapidapi_host.clone(),
      cfg.http_timeout(),
    )?;
    hub = hub.with_api_football(client);
  }

  Ok(hub)
}

/// Open the store, build every collaborator and assemble the dispatcher,
/// seeded with the clubs learned in earlier runs.
pub async fn build_bot(cfg: &ServerConfig) -> Result<FranckBot> {
  let store = JsonStore::open(expand_tilde(&cfg.data_dir)).await?;
  let sports = sports_hub(cfg)?;
  let wiki = WikipediaClient::new(
    &cfg.wikipedia_lang,
    Duration::from_secs(cfg.wikipedia_timeout_secs),
  )?;

  let strengths = StrengthTable::reference(cfg.default_strength);
  let history = SimulatedHistory::reference();
  let engine = match cfg.rng_seed {
    Some(seed) => PredictionEngine::seeded(strengths, history, seed),
    None => PredictionEngine::new(strengths, history, StdRng::from_entropy()),
  }
  .with_home_bonus(cfg.home_advantage_bonus);

  let bot = Dispatcher::new(store, sports, wiki, engine);
  bot.load_known_clubs().await?;
  Ok(bot)
}

/// The HTTP application with request tracing.
pub fn app(bot: FranckBot) -> Router {
  franck_api::api_router(Arc::new(bot)).layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
