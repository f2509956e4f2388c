//! API-Football (via RapidAPI) club lookup, used when SportMonks has nothing.

use std::time::Duration;

use franck_core::sources::TeamInfo;
use reqwest::Client;
use serde::Deserialize;

use crate::{Error, Result, http_client};

pub const API_FOOTBALL_BASE_URL: &str = "https://api-football-v1.p.rapidapi.com/v3";
pub const API_FOOTBALL_HOST: &str = "api-football-v1.p.rapidapi.com";

#[derive(Clone)]
pub struct ApiFootballClient {
  client:   Client,
  base_url: String,
  api_key:  String,
  host:     String,
}

impl ApiFootballClient {
  pub fn new(
    api_key: impl Into<String>,
    host: impl Into<String>,
    timeout: Duration,
  ) -> Result<Self> {
    Ok(Self {
      client:   http_client(timeout)?,
      base_url: API_FOOTBALL_BASE_URL.to_string(),
      api_key:  api_key.into(),
      host:     host.into(),
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
      .header("X-RapidAPI-Key", &self.api_key)
      .header("X-RapidAPI-Host", &self.host)
      .query(&[("search", name)])
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        provider: "api-football",
        status:   resp.status(),
      });
    }
    let body: TeamsResponse = resp.json().await?;
    Ok(body.response.into_iter().next().map(Into::into))
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TeamsResponse {
  #[serde(default)]
  response: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
  team:  RawTeam,
  #[serde(default)]
  venue: Option<RawVenue>,
}

#[derive(Deserialize)]
struct RawTeam {
  id:      i64,
  name:    String,
  #[serde(default)]
  country: Option<String>,
  #[serde(default)]
  founded: Option<i32>,
}

#[derive(Deserialize)]
struct RawVenue {
  #[serde(default)]
  name: Option<String>,
}

impl From<Entry> for TeamInfo {
  fn from(entry: Entry) -> Self {
    Self {
      id:      entry.team.id,
      name:    entry.team.name,
      country: entry.team.country,
      founded: entry.team.founded,
      stadium: entry.venue.and_then(|v| v.name),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn team_and_venue_are_merged() {
    let body: TeamsResponse = serde_json::from_str(
      r#"{"get":"teams","response":[{
        "team":{"id":33,"name":"Manchester United","country":"England","founded":1878},
        "venue":{"id":556,"name":"Old Trafford","city":"Manchester"}
      }]}"#,
    )
    .unwrap();
    let team = TeamInfo::from(body.response.into_iter().next().unwrap());
    assert_eq!(
      team.describe(),
      "Manchester United est basé en England. Fondé en 1878, son stade est Old Trafford."
    );
  }

  #[test]
  fn null_venue_name_is_unknown() {
    let body: TeamsResponse = serde_json::from_str(
      r#"{"response":[{"team":{"id":1,"name":"X","founded":null},"venue":{"name":null}}]}"#,
    )
    .unwrap();
    let team = TeamInfo::from(body.response.into_iter().next().unwrap());
    assert_eq!(team.stadium, None);
    assert_eq!(team.founded, None);
  }
}
