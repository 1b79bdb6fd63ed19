//! Error type for `roster-store-sqlite`.

use roster_core::store::{StoreError, StoreErrorKind};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sql error: {0}")]
  Sql(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("person not found: {0}")]
  PersonNotFound(Uuid),

  #[error("group not found: {0}")]
  GroupNotFound(Uuid),

  #[error("embed configuration not found: {0}")]
  EmbedNotFound(Uuid),

  /// Another person already claims this external user identity.
  #[error("user {0} is already linked to another person")]
  UserAlreadyLinked(Uuid),

  /// A concurrent save took the same `(language, slug)` pair first.
  /// Retryable: re-running the save allocates a fresh suffix.
  #[error("slug conflict in language {language:?}: {slug:?}")]
  SlugConflict { language: String, slug: String },
}

impl StoreError for Error {
  fn kind(&self) -> StoreErrorKind {
    match self {
      Self::PersonNotFound(_) | Self::GroupNotFound(_) | Self::EmbedNotFound(_) => {
        StoreErrorKind::NotFound
      }
      Self::UserAlreadyLinked(_) | Self::SlugConflict { .. } => StoreErrorKind::Conflict,
      Self::Core(roster_core::Error::UnknownLanguage(_)) => StoreErrorKind::Invalid,
      Self::Core(roster_core::Error::GroupNotFound(_)) => StoreErrorKind::NotFound,
      _ => StoreErrorKind::Other,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
