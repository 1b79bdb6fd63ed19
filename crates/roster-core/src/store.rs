//! The `DirectoryStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `roster-store-sqlite`). Higher layers (`roster-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  embed::{PeopleEmbed, PersonCard},
  group::{Group, NewGroup},
  person::{NewPerson, Person},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// How a single record is addressed: by the slug in one language's
/// namespace, or by id when no slug is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
  Slug(String),
  Id(Uuid),
}

/// Caller-supplied listing order; the store imposes no default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOrder {
  /// Oldest records first.
  Created,
  /// By translated name in the given language; untranslated records last.
  Name { language: String },
}

/// Coarse classification of a backend error, used by transport layers to
/// pick a response without knowing the concrete backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
  /// The addressed record does not exist.
  NotFound,
  /// A uniqueness rule was violated (duplicate user link, concurrent slug
  /// race). Conflicts from slug races are retryable.
  Conflict,
  /// The input itself is unacceptable (e.g. an unconfigured language).
  Invalid,
  Other,
}

/// Implemented by backend error types so transport layers can map errors to
/// responses generically.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> StoreErrorKind {
    StoreErrorKind::Other
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a directory storage backend.
///
/// Saves are atomic: slug allocation and persistence for a record commit as
/// one unit relative to concurrent saves in the same language namespace.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DirectoryStore: Send + Sync {
  type Error: StoreError;

  // ── People ────────────────────────────────────────────────────────────

  /// Persist a new person. Every translation with an empty slug has one
  /// allocated within its language's namespace before the write commits.
  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Re-save an existing person. Non-empty slugs are kept; missing ones are
  /// allocated.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Fetch by slug within one language, or by id when no slug is supplied.
  fn find_person<'a>(
    &'a self,
    language: &'a str,
    key: &'a RecordKey,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  fn list_people(
    &self,
    order: ListOrder,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn delete_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Groups ────────────────────────────────────────────────────────────

  /// Persist a new group; slug allocation as for people, in the group
  /// namespace.
  fn create_group(
    &self,
    input: NewGroup,
  ) -> impl Future<Output = Result<Group, Self::Error>> + Send + '_;

  fn update_group(
    &self,
    group: Group,
  ) -> impl Future<Output = Result<Group, Self::Error>> + Send + '_;

  fn get_group(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Group>, Self::Error>> + Send + '_;

  fn find_group<'a>(
    &'a self,
    language: &'a str,
    key: &'a RecordKey,
  ) -> impl Future<Output = Result<Option<Group>, Self::Error>> + Send + 'a;

  fn list_groups(
    &self,
    order: ListOrder,
  ) -> impl Future<Output = Result<Vec<Group>, Self::Error>> + Send + '_;

  /// Delete a group. Membership references held by people are dropped; the
  /// people themselves are untouched.
  fn delete_group(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Embeds ────────────────────────────────────────────────────────────

  /// Create or replace an embed configuration, including its ordered people
  /// list.
  fn save_embed(
    &self,
    embed: PeopleEmbed,
  ) -> impl Future<Output = Result<PeopleEmbed, Self::Error>> + Send + '_;

  fn get_embed(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PeopleEmbed>, Self::Error>> + Send + '_;

  /// Resolve the configured ordered people with their primary-group
  /// projection loaded for rendering.
  fn selected_people(
    &self,
    embed_id: Uuid,
  ) -> impl Future<Output = Result<Vec<PersonCard>, Self::Error>> + Send + '_;
}
