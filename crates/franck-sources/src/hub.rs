//! [`SportsHub`] — the configured sports clients behind one [`SportsData`].

use franck_core::sources::{
  Country, League, LiveMatch, SportsData, TeamInfo, TeamSummary,
};

use crate::{AllSportsClient, ApiFootballClient, Result, SportMonksClient};

/// Every client is optional; a missing one simply contributes no data.
#[derive(Clone, Default)]
pub struct SportsHub {
  allsports:    Option<AllSportsClient>,
  sportmonks:   Option<SportMonksClient>,
  api_football: Option<ApiFootballClient>,
}

impl SportsHub {
  pub fn new() -> Self { Self::default() }

  pub fn with_allsports(mut self, client: AllSportsClient) -> Self {
    self.allsports = Some(client);
    self
  }

  pub fn with_sportmonks(mut self, client: SportMonksClient) -> Self {
    self.sportmonks = Some(client);
    self
  }

  pub fn with_api_football(mut self, client: ApiFootballClient) -> Self {
    self.api_football = Some(client);
    self
  }
}

/// Log a provider failure and degrade to the empty value.
fn or_empty<T: Default>(result: Result<T>, what: &str) -> T {
  result.unwrap_or_else(|e| {
    tracing::warn!(error = %e, what, "sports provider call failed");
    T::default()
  })
}

impl SportsData for SportsHub {
  async fn find_team(&self, name: &str) -> Option<TeamInfo> {
    if let Some(client) = &self.sportmonks
      && let Some(team) =
        or_empty(client.find_team(name).await, "sportmonks team")
    {
      return Some(team);
    }
    if let Some(client) = &self.api_football
      && let Some(team) =
        or_empty(client.find_team(name).await, "api-football team")
    {
      return Some(team);
    }
    tracing::info!(name, "no provider knows this team");
    None
  }

  async fn live_matches(&self) -> Vec<LiveMatch> {
    match &self.allsports {
      Some(client) => or_empty(client.live_matches().await, "live matches"),
      None => Vec::new(),
    }
  }

  async fn countries(&self) -> Vec<Country> {
    match &self.allsports {
      Some(client) => or_empty(client.countries().await, "countries"),
      None => Vec::new(),
    }
  }

  async fn leagues(&self, country: &str) -> Vec<League> {
    match &self.allsports {
      Some(client) => or_empty(client.leagues(country).await, "leagues"),
      None => Vec::new(),
    }
  }

  async fn teams(&self, league_id: i64) -> Vec<TeamSummary> {
    match &self.allsports {
      Some(client) => or_empty(client.teams(league_id).await, "teams"),
      None => Vec::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  #[tokio::test]
  async fn unconfigured_hub_has_no_data() {
    let hub = SportsHub::new();
    assert_eq!(hub.find_team("PSG").await, None);
    assert!(hub.live_matches().await.is_empty());
    assert!(hub.countries().await.is_empty());
    assert!(hub.leagues("France").await.is_empty());
    assert!(hub.teams(168).await.is_empty());
  }

  #[tokio::test]
  async fn unreachable_provider_degrades_to_empty() {
    // Nothing listens on the discard port; the connection is refused.
    let client = AllSportsClient::new("key", Duration::from_secs(1))
      .unwrap()
      .with_base_url("http://127.0.0.1:9/");
    let hub = SportsHub::new().with_allsports(client);
    assert!(hub.countries().await.is_empty());
  }
}
