//! JSON API and server plumbing for the Roster people directory.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::store::DirectoryStore`]. Page rendering, auth, and
//! transport concerns are the host platform's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/directory", roster_api::api_router(state.clone()))
//! ```

pub mod embeds;
pub mod error;
pub mod groups;
pub mod people;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::{locale::Locales, store::DirectoryStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `ROSTER_*` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Absolute site root; used for the vCard photo URL fallback.
  pub base_url:   String,
  pub store_path: PathBuf,
  /// Configured languages and fallback chains.
  pub locales:    Locales,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: DirectoryStore> {
  pub store:    Arc<S>,
  pub locales:  Arc<Locales>,
  /// Absolute site root for photo URL fallbacks in vCard downloads.
  pub base_url: Option<String>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: DirectoryStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // People
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete_one::<S>),
    )
    .route("/people/{id}/vcard", get(people::vcard::<S>))
    .route("/people/by-slug/{language}/{slug}", get(people::get_by_slug::<S>))
    // Groups
    .route("/groups", get(groups::list::<S>).post(groups::create::<S>))
    .route(
      "/groups/{id}",
      get(groups::get_one::<S>)
        .put(groups::update::<S>)
        .delete(groups::delete_one::<S>),
    )
    .route("/groups/by-slug/{language}/{slug}", get(groups::get_by_slug::<S>))
    // Embeds
    .route("/embeds", post(embeds::create::<S>))
    .route("/embeds/{id}", get(embeds::get_one::<S>).put(embeds::save_one::<S>))
    .route("/embeds/{id}/people", get(embeds::selected::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
