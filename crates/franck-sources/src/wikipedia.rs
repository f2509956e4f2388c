//! Wikipedia search and page summaries.

use std::time::Duration;

use franck_core::sources::{Encyclopedia, PageSummary};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::{Error, Result, http_client};

pub const WIKIPEDIA_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for one language edition, e.g. `fr.wikipedia.org`.
#[derive(Clone)]
pub struct WikipediaClient {
  client:   Client,
  base_url: String,
}

impl WikipediaClient {
  pub fn new(lang: &str, timeout: Duration) -> Result<Self> {
    Ok(Self {
      client:   http_client(timeout)?,
      base_url: format!("https://{lang}.wikipedia.org"),
    })
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  fn api_url(&self, path: &str) -> Result<Url> {
    let base = self.base_url.trim_end_matches('/');
    Url::parse(&format!("{base}{path}")).map_err(|e| Error::Url(e.to_string()))
  }

  /// `GET /w/api.php?action=query&list=search&srsearch=<term>&format=json`
  pub async fn search_titles(&self, term: &str) -> Result<Vec<String>> {
    let resp = self
      .client
      .get(self.api_url("/w/api.php")?)
      .query(&[
        ("action", "query"),
        ("list", "search"),
        ("srsearch", term),
        ("format", "json"),
      ])
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        provider: "wikipedia",
        status:   resp.status(),
      });
    }
    let body: SearchResponse = resp.json().await?;
    Ok(body.titles())
  }

  /// `GET /api/rest_v1/page/summary/<title>`; `None` if there is no such page.
  pub async fn page_summary(&self, title: &str) -> Result<Option<PageSummary>> {
    let mut url = self.api_url("/api/rest_v1/page/summary")?;
    url
      .path_segments_mut()
      .map_err(|()| Error::Url(self.base_url.clone()))?
      .push(title);

    let resp = self.client.get(url).send().await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !resp.status().is_success() {
      return Err(Error::Status {
        provider: "wikipedia",
        status:   resp.status(),
      });
    }
    Ok(Some(resp.json().await?))
  }
}

impl Encyclopedia for WikipediaClient {
  async fn search(&self, term: &str) -> Vec<String> {
    self.search_titles(term).await.unwrap_or_else(|e| {
      tracing::warn!(error = %e, term, "wikipedia search failed");
      Vec::new()
    })
  }

  async fn summary(&self, title: &str) -> Option<PageSummary> {
    self.page_summary(title).await.unwrap_or_else(|e| {
      tracing::warn!(error = %e, title, "wikipedia summary failed");
      None
    })
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchResponse {
  #[serde(default)]
  query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
  #[serde(default)]
  search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
  title: String,
}

impl SearchResponse {
  fn titles(self) -> Vec<String> {
    self
      .query
      .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
      .unwrap_or_default()
  }
}
