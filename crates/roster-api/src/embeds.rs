//! Handlers for `/embeds` endpoints — embedding configurations and the
//! resolved people lists pages render from.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/embeds` | Body: [`EmbedBody`]; returns 201 |
//! | `GET`  | `/embeds/:id` | 404 if not found |
//! | `PUT`  | `/embeds/:id` | Create or replace with the given id |
//! | `GET`  | `/embeds/:id/people` | `?language=…`; render-ready rows |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  embed::{EmbedStyle, PeopleEmbed},
  group::Group,
  person::Person,
  store::DirectoryStore,
  url::person_detail_path,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Save ─────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
  true
}

/// JSON body accepted by `POST /embeds` and `PUT /embeds/:id`.
#[derive(Debug, Deserialize)]
pub struct EmbedBody {
  #[serde(default)]
  pub style:          EmbedStyle,
  /// Ordered person references.
  #[serde(default)]
  pub people:         Vec<Uuid>,
  #[serde(default = "default_true")]
  pub group_by_group: bool,
  #[serde(default)]
  pub show_links:     bool,
  #[serde(default)]
  pub show_vcard:     bool,
}

impl EmbedBody {
  fn into_embed(self, embed_id: Uuid) -> PeopleEmbed {
    PeopleEmbed {
      embed_id,
      style: self.style,
      people: self.people,
      group_by_group: self.group_by_group,
      show_links: self.show_links,
      show_vcard: self.show_vcard,
    }
  }
}

/// `POST /embeds` — returns 201 + the stored configuration.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<EmbedBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + Clone,
{
  let embed = state
    .store
    .save_embed(body.into_embed(Uuid::new_v4()))
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(embed)))
}

/// `PUT /embeds/:id` — create or replace the configuration with this id.
pub async fn save_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<EmbedBody>,
) -> Result<Json<PeopleEmbed>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let embed = state
    .store
    .save_embed(body.into_embed(id))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(embed))
}

// ─── Get ──────────────────────────────────────────────────────────────────────

/// `GET /embeds/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PeopleEmbed>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let embed = state
    .store
    .get_embed(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("embed configuration {id} not found")))?;
  Ok(Json(embed))
}

// ─── Resolved people ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SelectedParams {
  pub language: Option<String>,
}

/// A render-ready row for one embedded person.
#[derive(Debug, Serialize)]
pub struct EmbedPersonRow {
  pub person:        Person,
  pub primary_group: Option<Group>,
  /// Present when the configuration enables detail links.
  pub detail_path:   Option<String>,
  /// Present when the configuration enables vCard downloads and the person
  /// allows them.
  pub vcard_path:    Option<String>,
}

/// `GET /embeds/:id/people[?language=<lang>]` — the configured people in
/// their stored order, with primary-group projections and optional links.
pub async fn selected<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<SelectedParams>,
) -> Result<Json<Vec<EmbedPersonRow>>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let embed = state
    .store
    .get_embed(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("embed configuration {id} not found")))?;

  let cards = state
    .store
    .selected_people(id)
    .await
    .map_err(ApiError::from_store)?;

  let language = params
    .language
    .unwrap_or_else(|| state.locales.default_language().to_owned());

  let rows = cards
    .into_iter()
    .map(|card| {
      let detail_path = embed
        .show_links
        .then(|| person_detail_path(&card.person, &language));
      let vcard_path = (embed.show_vcard && card.person.vcard_enabled).then(|| {
        format!("/people/{}/vcard?language={language}", card.person.person_id)
      });
      EmbedPersonRow {
        person: card.person,
        primary_group: card.primary_group,
        detail_path,
        vcard_path,
      }
    })
    .collect();

  Ok(Json(rows))
}
