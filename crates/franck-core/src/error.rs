//! Error types for `franck-core`.
//!
//! These are user-input errors. Their `Display` text is the corrective message
//! shown back to the user, so it is written in the bot's language.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("Format incorrect. Utilise : <Équipe1> vs <Équipe2>")]
  MissingVersus,

  #[error("Format incorrect. Une seule confrontation à la fois.")]
  TooManyVersus,

  #[error("Format incorrect. Il manque le nom d'une équipe.")]
  EmptyTeam,

  #[error("Format incorrect. Utilise '{example}' par exemple.")]
  InvalidCount { example: &'static str },

  #[error("Format incorrect. Utilise : corrige <question> => <réponse>")]
  MalformedCorrection,

  #[error("Format incorrect. Utilise : ajoute club <nom du club>")]
  MissingClub,

  #[error("Format incorrect. Utilise : ligues en <pays>")]
  MissingCountry,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
