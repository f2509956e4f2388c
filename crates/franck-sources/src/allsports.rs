//! AllSportsAPI client: countries, leagues, teams and live fixtures.

use std::time::Duration;

use franck_core::sources::{Country, League, LiveMatch, TeamSummary};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{Error, Result, http_client, lenient_id};

pub const ALLSPORTS_BASE_URL: &str = "https://apiv2.allsportsapi.com/football/";

const PROVIDER: &str = "allsportsapi";

/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct AllSportsClient {
  client:   Client,
  base_url: String,
  api_key:  String,
}

impl AllSportsClient {
  pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
    Ok(Self {
      client:   http_client(timeout)?,
      base_url: ALLSPORTS_BASE_URL.to_string(),
      api_key:  api_key.into(),
    })
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// `GET /?met=<method>&APIkey=<key>[&params…]`
  async fn call<T: DeserializeOwned>(
    &self,
    method: &str,
    params: &[(&str, String)],
  ) -> Result<Vec<T>> {
    let resp = self
      .client
      .get(&self.base_url)
      .query(&[("met", method), ("APIkey", self.api_key.as_str())])
      .query(params)
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        provider: PROVIDER,
        status:   resp.status(),
      });
    }
    resp.json::<Envelope<T>>().await?.into_result()
  }

  /// `met=Countries`
  pub async fn countries(&self) -> Result<Vec<Country>> {
    let raw: Vec<RawCountry> = self.call("Countries", &[]).await?;
    Ok(raw.into_iter().map(Into::into).collect())
  }

  /// `met=Leagues&countryName=<country>`
  pub async fn leagues(&self, country: &str) -> Result<Vec<League>> {
    let raw: Vec<RawLeague> = self
      .call("Leagues", &[("countryName", country.to_string())])
      .await?;
    Ok(raw.into_iter().map(Into::into).collect())
  }

  /// `met=Teams&leagueId=<id>`
  pub async fn teams(&self, league_id: i64) -> Result<Vec<TeamSummary>> {
    let raw: Vec<RawTeam> = self
      .call("Teams", &[("leagueId", league_id.to_string())])
      .await?;
    Ok(raw.into_iter().map(Into::into).collect())
  }

  /// `met=Fixtures&matchLive=1`
  pub async fn live_matches(&self) -> Result<Vec<LiveMatch>> {
    let raw: Vec<RawFixture> = self
      .call("Fixtures", &[("matchLive", "1".to_string())])
      .await?;
    Ok(raw.into_iter().map(Into::into).collect())
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

/// Every response is wrapped as `{"success": 1, "result": [...]}`.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
  success: i64,
  #[serde(default)]
  result:  Option<Vec<T>>,
  #[serde(default)]
  message: Option<String>,
}

impl<T> Envelope<T> {
  fn into_result(self) -> Result<Vec<T>> {
    if self.success != 1 {
      return Err(Error::Rejected {
        provider: PROVIDER,
        message:  self.message.unwrap_or_else(|| "Inconnue".to_string()),
      });
    }
    // A successful call with nothing to report omits `result`.
    Ok(self.result.unwrap_or_default())
  }
}

#[derive(Deserialize)]
struct RawCountry {
  #[serde(deserialize_with = "lenient_id")]
  country_key:  i64,
  country_name: String,
}

impl From<RawCountry> for Country {
  fn from(raw: RawCountry) -> Self {
    Self {
      id:   raw.country_key,
      name: raw.country_name,
    }
  }
}

#[derive(Deserialize)]
struct RawLeague {
  #[serde(deserialize_with = "lenient_id")]
  league_key:   i64,
  league_name:  String,
  #[serde(default)]
  country_name: Option<String>,
}

impl From<RawLeague> for League {
  fn from(raw: RawLeague) -> Self {
    Self {
      id:      raw.league_key,
      name:    raw.league_name,
      country: raw.country_name,
    }
  }
}

#[derive(Debug, Deserialize)]
struct RawTeam {
  #[serde(deserialize_with = "lenient_id")]
  team_key:  i64,
  team_name: String,
}

impl From<RawTeam> for TeamSummary {
  fn from(raw: RawTeam) -> Self {
    Self {
      id:   raw.team_key,
      name: raw.team_name,
    }
  }
}

#[derive(Deserialize)]
struct RawFixture {
  event_home_team:    String,
  event_away_team:    String,
  #[serde(default)]
  event_final_result: Option<String>,
  #[serde(default)]
  event_status:       Option<String>,
  #[serde(default)]
  league_name:        Option<String>,
}

impl From<RawFixture> for LiveMatch {
  fn from(raw: RawFixture) -> Self {
    Self {
      home_team: raw.event_home_team,
      away_team: raw.event_away_team,
      score:     raw.event_final_result.unwrap_or_else(|| "-".to_string()),
      status:    raw.event_status.unwrap_or_default(),
      league:    raw.league_name,
    }
  }
}
