//! Error types for `roster-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("person not found: {0}")]
  PersonNotFound(Uuid),

  #[error("group not found: {0}")]
  GroupNotFound(Uuid),

  #[error("embed configuration not found: {0}")]
  EmbedNotFound(Uuid),

  #[error("language {0:?} is not in the configured language set")]
  UnknownLanguage(String),

  #[error("user {0} is already linked to another person")]
  UserAlreadyLinked(Uuid),

  /// The suffix search ran out of attempts; the namespace around `{0}` is
  /// saturated.
  #[error("slug namespace exhausted for base {0:?}")]
  SlugExhausted(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
