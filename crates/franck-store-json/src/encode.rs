//! On-disk shapes of the answer dictionary.
//!
//! Current files store each answer as the tagged [`Answer`] form. Older files
//! hold either a bare string or a French-keyed club object; both are still
//! accepted on load and rewritten in the current form on the next save.

use std::collections::BTreeMap;

use franck_core::knowledge::{Answer, ClubProfile, normalize_question};
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswer {
  Current(Answer),
  Text(String),
  Legacy(LegacyProfile),
}

#[derive(Deserialize)]
struct LegacyProfile {
  #[serde(rename = "définition")]
  definition:  String,
  #[serde(rename = "tactique")]
  tactics:     Option<String>,
  #[serde(rename = "transfert")]
  transfers:   Option<String>,
  performance: Option<String>,
}

impl From<RawAnswer> for Answer {
  fn from(raw: RawAnswer) -> Self {
    match raw {
      RawAnswer::Current(answer) => answer,
      RawAnswer::Text(text) => Answer::PlainText(text),
      RawAnswer::Legacy(legacy) => {
        let mut profile = ClubProfile::from_definition(legacy.definition);
        if let Some(tactics) = legacy.tactics {
          profile.tactics = tactics;
        }
        if let Some(transfers) = legacy.transfers {
          profile.transfers = transfers;
        }
        if let Some(performance) = legacy.performance {
          profile.performance = performance;
        }
        Answer::ClubProfile(profile)
      }
    }
  }
}

pub fn decode_dictionary(text: &str) -> Result<BTreeMap<String, Answer>> {
  let raw: BTreeMap<String, Value> = serde_json::from_str(text)?;
  raw
    .into_iter()
    .map(|(key, value)| {
      let answer = serde_json::from_value::<RawAnswer>(value).map_err(|e| {
        Error::MalformedEntry {
          key:    key.clone(),
          reason: e.to_string(),
        }
      })?;
      Ok((normalize_question(&key), answer.into()))
    })
    .collect()
}

pub fn encode_dictionary(answers: &BTreeMap<String, Answer>) -> Result<String> {
  Ok(serde_json::to_string_pretty(answers)?)
}
