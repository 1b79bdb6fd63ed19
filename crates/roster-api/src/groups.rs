//! Handlers for `/groups` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/groups` | Optional `?order=created\|name&language=…` |
//! | `POST`   | `/groups` | Body: [`GroupBody`]; returns 201 |
//! | `GET`    | `/groups/:id` | 404 if not found |
//! | `PUT`    | `/groups/:id` | Full-record update |
//! | `DELETE` | `/groups/:id` | Drops memberships, keeps people |
//! | `GET`    | `/groups/by-slug/:language/:slug` | Exact-language slug lookup |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  group::{Group, GroupTranslation, NewGroup},
  locale::TranslationSet,
  store::{DirectoryStore, RecordKey},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  error::ApiError,
  people::{ListParams, list_order},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /groups[?order=name&language=<lang>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Group>>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let order = list_order(params.order, params.language, &state.locales);
  let groups = state
    .store
    .list_groups(order)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(groups))
}

// ─── Create / update ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /groups` and `PUT /groups/:id`.
#[derive(Debug, Deserialize)]
pub struct GroupBody {
  #[serde(default)]
  pub translations: TranslationSet<GroupTranslation>,
  pub address:     Option<String>,
  pub postal_code: Option<String>,
  pub city:        Option<String>,
  pub phone:       Option<String>,
  pub fax:         Option<String>,
  pub email:       Option<String>,
  pub website:     Option<String>,
}

impl From<GroupBody> for NewGroup {
  fn from(b: GroupBody) -> Self {
    NewGroup {
      translations: b.translations,
      address:     b.address,
      postal_code: b.postal_code,
      city:        b.city,
      phone:       b.phone,
      fax:         b.fax,
      email:       b.email,
      website:     b.website,
    }
  }
}

/// `POST /groups` — returns 201 + the stored [`Group`] with slugs assigned.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<GroupBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + Clone,
{
  let group = state
    .store
    .create_group(NewGroup::from(body))
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(group)))
}

/// `PUT /groups/:id` — replaces the record; the creation timestamp is kept.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<GroupBody>,
) -> Result<Json<Group>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let existing = state
    .store
    .get_group(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("group {id} not found")))?;

  let group = NewGroup::from(body).into_group(id, existing.created_at);
  let group = state
    .store
    .update_group(group)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(group))
}

// ─── Get / delete ─────────────────────────────────────────────────────────────

/// `GET /groups/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Group>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let group = state
    .store
    .get_group(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("group {id} not found")))?;
  Ok(Json(group))
}

/// `GET /groups/by-slug/:language/:slug`
pub async fn get_by_slug<S>(
  State(state): State<AppState<S>>,
  Path((language, slug)): Path<(String, String)>,
) -> Result<Json<Group>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let group = state
    .store
    .find_group(&language, &RecordKey::Slug(slug.clone()))
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no group with slug {slug:?} in {language:?}"))
    })?;
  Ok(Json(group))
}

/// `DELETE /groups/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DirectoryStore + Clone,
{
  state
    .store
    .delete_group(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
