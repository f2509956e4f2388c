//! [`JsonStore`] — the file-backed implementation of [`KnowledgeStore`].

use std::{
  collections::BTreeMap,
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::Arc,
};

use franck_core::knowledge::{
  Answer, Interaction, KnowledgeStore, normalize_question,
};
use tokio::{fs, io::AsyncWriteExt as _, sync::Mutex};

use crate::{
  Result,
  encode::{decode_dictionary, encode_dictionary},
  error::io_at,
};

pub const DICTIONARY_FILE: &str = "franck_dictionary.json";
pub const PREDICTIONS_FILE: &str = "predictions_log.txt";

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Paths {
  dictionary:  PathBuf,
  predictions: PathBuf,
}

#[derive(Debug, Default)]
struct State {
  answers:      BTreeMap<String, Answer>,
  interactions: Vec<Interaction>,
  predictions:  Vec<String>,
}

/// A knowledge store persisted as files in a data directory.
///
/// The interaction log lives only as long as the process. Cloning is cheap;
/// clones share the same state and the same lock.
#[derive(Debug, Clone)]
pub struct JsonStore {
  paths: Option<Arc<Paths>>,
  state: Arc<Mutex<State>>,
}

impl JsonStore {
  /// Open (or create) a store in `data_dir`, loading any existing files.
  pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
    let data_dir = data_dir.as_ref();
    fs::create_dir_all(data_dir).await.map_err(io_at(data_dir))?;

    let paths = Paths {
      dictionary:  data_dir.join(DICTIONARY_FILE),
      predictions: data_dir.join(PREDICTIONS_FILE),
    };
    let state = State {
      answers:      load_dictionary(&paths.dictionary).await?,
      interactions: Vec::new(),
      predictions:  load_predictions(&paths.predictions).await?,
    };
    tracing::info!(
      dir = %data_dir.display(),
      answers = state.answers.len(),
      predictions = state.predictions.len(),
      "opened knowledge store"
    );

    Ok(Self {
      paths: Some(Arc::new(paths)),
      state: Arc::new(Mutex::new(state)),
    })
  }

  /// A store that never touches the filesystem — useful for testing.
  pub fn open_in_memory() -> Self {
    Self {
      paths: None,
      state: Arc::default(),
    }
  }

  /// Rewrite the dictionary file from `answers`. Callers hold the state lock
  /// and commit `answers` to it only once this succeeds.
  async fn save_dictionary(
    &self,
    answers: &BTreeMap<String, Answer>,
  ) -> Result<()> {
    let Some(paths) = &self.paths else {
      return Ok(());
    };
    let text = encode_dictionary(answers)?;
    let tmp = paths.dictionary.with_extension("json.tmp");
    fs::write(&tmp, text).await.map_err(io_at(&tmp))?;
    fs::rename(&tmp, &paths.dictionary)
      .await
      .map_err(io_at(&paths.dictionary))?;
    tracing::debug!(entries = answers.len(), "saved dictionary");
    Ok(())
  }

  async fn append_prediction(&self, line: &str) -> Result<()> {
    let Some(paths) = &self.paths else {
      return Ok(());
    };
    let path = &paths.predictions;
    let mut file = fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(path)
      .await
      .map_err(io_at(path))?;
    file
      .write_all(format!("{line}\n").as_bytes())
      .await
      .map_err(io_at(path))?;
    file.flush().await.map_err(io_at(path))?;
    Ok(())
  }
}

async fn load_dictionary(path: &Path) -> Result<BTreeMap<String, Answer>> {
  match fs::read_to_string(path).await {
    Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
    Ok(text) => decode_dictionary(&text),
    Err(e) if e.kind() == ErrorKind::NotFound => {
      tracing::warn!(
        path = %path.display(),
        "no dictionary yet, starting empty"
      );
      Ok(BTreeMap::new())
    }
    Err(e) => Err(io_at(path)(e)),
  }
}

async fn load_predictions(path: &Path) -> Result<Vec<String>> {
  match fs::read_to_string(path).await {
    Ok(text) => Ok(
      text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect(),
    ),
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
    Err(e) => Err(io_at(path)(e)),
  }
}

// ─── KnowledgeStore impl ─────────────────────────────────────────────────────

impl KnowledgeStore for JsonStore {
  type Error = crate::Error;

  async fn get(&self, question: &str) -> Result<Option<Answer>> {
    let state = self.state.lock().await;
    Ok(state.answers.get(&normalize_question(question)).cloned())
  }

  async fn put(&self, question: &str, answer: Answer) -> Result<()> {
    let mut state = self.state.lock().await;
    let mut answers = state.answers.clone();
    answers.insert(normalize_question(question), answer);
    self.save_dictionary(&answers).await?;
    state.answers = answers;
    Ok(())
  }

  async fn correct(&self, question: &str, answer: Answer) -> Result<usize> {
    let mut state = self.state.lock().await;
    let text = answer.text().to_string();
    let mut answers = state.answers.clone();
    answers.insert(normalize_question(question), answer);
    self.save_dictionary(&answers).await?;
    state.answers = answers;

    let mut validated = 0;
    for interaction in state
      .interactions
      .iter_mut()
      .filter(|i| i.question == question)
    {
      interaction.validated = true;
      interaction.answer.clone_from(&text);
      validated += 1;
    }
    tracing::info!(question, validated, "answer corrected");
    Ok(validated)
  }

  async fn club_names(&self) -> Result<Vec<String>> {
    let state = self.state.lock().await;
    Ok(
      state
        .answers
        .iter()
        .filter(|(_, answer)| matches!(answer, Answer::ClubProfile(_)))
        .map(|(key, _)| key.clone())
        .collect(),
    )
  }

  async fn log_interaction(
    &self,
    question: String,
    answer: String,
  ) -> Result<Interaction> {
    let interaction = Interaction::new(question, answer);
    self.state.lock().await.interactions.push(interaction.clone());
    Ok(interaction)
  }

  async fn interactions(&self) -> Result<Vec<Interaction>> {
    Ok(self.state.lock().await.interactions.clone())
  }

  async fn log_prediction(&self, line: String) -> Result<()> {
    let mut state = self.state.lock().await;
    self.append_prediction(&line).await?;
    state.predictions.push(line);
    Ok(())
  }

  async fn predictions(&self, limit: Option<usize>) -> Result<Vec<String>> {
    let state = self.state.lock().await;
    let skip = limit.map_or(0, |n| state.predictions.len().saturating_sub(n));
    Ok(state.predictions[skip..].to_vec())
  }
}
