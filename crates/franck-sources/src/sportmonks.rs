//! SportMonks club lookup.

use std::time::Duration;

use franck_core::sources::TeamInfo;
use reqwest::Client;
use serde::Deserialize;

use crate::{Error, Result, http_client};

pub const SPORTMONKS_BASE_URL: &str = "https://api.sportmonks.com/v3/football";

#[derive(Clone)]
pub struct SportMonksClient {
  client:    Client,
  base_url:  String,
  api_token: String,
}

impl SportMonksClient {
  pub fn new(api_token: impl Into<String>, timeout: Duration) -> Result<Self> {
    Ok(Self {
      client:    http_client(timeout)?,
      base_url:  SPORTMONKS_BASE_URL.to_string(),
      api_token: api_token.into(),
    })
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// `GET /teams?search=<name>` — the first hit, if any.
  pub async fn find_team(&self, name: &str) -> Result<Option<TeamInfo>> {
    let url = format!("{}/teams", self.base_url.trim_end_matches('/'));
    let resp = self
      .client
      .get(url)
      .query(&[("api_token", self.api_token.as_str()), ("search", name)])
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        provider: "sportmonks",
        status:   resp.status(),
      });
    }
    let body: TeamsResponse = resp.json().await?;
    Ok(body.data.into_iter().next().map(Into::into))
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TeamsResponse {
  #[serde(default)]
  data: Vec<RawTeam>,
}

#[derive(Deserialize)]
struct RawTeam {
  id:      i64,
  name:    String,
  #[serde(default)]
  founded: Option<i32>,
  #[serde(default)]
  country: Option<Named>,
  #[serde(default)]
  venue:   Option<Named>,
}

#[derive(Deserialize)]
struct Named {
  name: String,
}

impl From<RawTeam> for TeamInfo {
  fn from(raw: RawTeam) -> Self {
    Self {
      id:      raw.id,
      name:    raw.name,
      country: raw.country.map(|c| c.name),
      founded: raw.founded,
      stadium: raw.venue.map(|v| v.name),
    }
  }
}
