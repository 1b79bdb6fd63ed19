//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/people` | Optional `?order=created\|name&language=…` |
//! | `POST`   | `/people` | Body: [`PersonBody`]; returns 201 |
//! | `GET`    | `/people/:id` | 404 if not found |
//! | `PUT`    | `/people/:id` | Full-record update |
//! | `DELETE` | `/people/:id` | Returns 204 |
//! | `GET`    | `/people/:id/vcard` | `?language=…`; 404 unless enabled |
//! | `GET`    | `/people/by-slug/:language/:slug` | Exact-language slug lookup |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use roster_core::{
  locale::{Locales, TranslationSet},
  person::{ImageRef, NewPerson, Person, PersonTranslation},
  store::{DirectoryStore, ListOrder, RecordKey},
};
use roster_vcard::ComposeOptions;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderParam {
  #[default]
  Created,
  Name,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub order:    OrderParam,
  /// Language for name ordering; defaults to the first configured language.
  pub language: Option<String>,
}

pub(crate) fn list_order(order: OrderParam, language: Option<String>, locales: &Locales) -> ListOrder {
  match order {
    OrderParam::Created => ListOrder::Created,
    OrderParam::Name => ListOrder::Name {
      language: language.unwrap_or_else(|| locales.default_language().to_owned()),
    },
  }
}

/// `GET /people[?order=name&language=<lang>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let order = list_order(params.order, params.language, &state.locales);
  let people = state
    .store
    .list_people(order)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(people))
}

// ─── Create / update ──────────────────────────────────────────────────────────

fn default_true() -> bool {
  true
}

/// JSON body accepted by `POST /people` and `PUT /people/:id`.
#[derive(Debug, Deserialize)]
pub struct PersonBody {
  #[serde(default)]
  pub translations:  TranslationSet<PersonTranslation>,
  pub phone:         Option<String>,
  pub mobile:        Option<String>,
  pub fax:           Option<String>,
  pub email:         Option<String>,
  pub website:       Option<String>,
  #[serde(default)]
  pub groups:        Vec<Uuid>,
  pub visual:        Option<ImageRef>,
  #[serde(default = "default_true")]
  pub vcard_enabled: bool,
  pub user:          Option<Uuid>,
}

impl From<PersonBody> for NewPerson {
  fn from(b: PersonBody) -> Self {
    NewPerson {
      translations:  b.translations,
      phone:         b.phone,
      mobile:        b.mobile,
      fax:           b.fax,
      email:         b.email,
      website:       b.website,
      groups:        b.groups,
      visual:        b.visual,
      vcard_enabled: b.vcard_enabled,
      user:          b.user,
    }
  }
}

/// `POST /people` — returns 201 + the stored [`Person`] with slugs assigned.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<PersonBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + Clone,
{
  let person = state
    .store
    .create_person(NewPerson::from(body))
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(person)))
}

/// `PUT /people/:id` — replaces the record; the creation timestamp is kept.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<PersonBody>,
) -> Result<Json<Person>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let existing = state
    .store
    .get_person(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;

  let person = NewPerson::from(body).into_person(id, existing.created_at);
  let person = state
    .store
    .update_person(person)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(person))
}

// ─── Get / delete ─────────────────────────────────────────────────────────────

/// `GET /people/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Person>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let person = state
    .store
    .get_person(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}

/// `GET /people/by-slug/:language/:slug`
pub async fn get_by_slug<S>(
  State(state): State<AppState<S>>,
  Path((language, slug)): Path<(String, String)>,
) -> Result<Json<Person>, ApiError>
where
  S: DirectoryStore + Clone,
{
  let person = state
    .store
    .find_person(&language, &RecordKey::Slug(slug.clone()))
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no person with slug {slug:?} in {language:?}"))
    })?;
  Ok(Json(person))
}

/// `DELETE /people/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DirectoryStore + Clone,
{
  state
    .store
    .delete_person(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── vCard download ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VcardParams {
  pub language: Option<String>,
}

/// `GET /people/:id/vcard[?language=<lang>]` — contact-card download.
/// 404 unless the person exists and has vCard downloads enabled.
pub async fn vcard<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<VcardParams>,
) -> Result<Response, ApiError>
where
  S: DirectoryStore + Clone,
{
  let person = state
    .store
    .get_person(id)
    .await
    .map_err(ApiError::from_store)?
    .filter(|p| p.vcard_enabled)
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;

  let primary_group = match person.primary_group() {
    Some(group_id) => state
      .store
      .get_group(group_id)
      .await
      .map_err(ApiError::from_store)?,
    None => None,
  };

  let language = params
    .language
    .unwrap_or_else(|| state.locales.default_language().to_owned());
  let opts = ComposeOptions {
    language: &language,
    locales:  &state.locales,
    base_url: state.base_url.as_deref(),
  };
  let payload = roster_vcard::compose(&person, primary_group.as_ref(), &opts);
  let filename = roster_vcard::download_filename(&person, &language, &state.locales);

  Ok(
    (
      [
        (header::CONTENT_TYPE, roster_vcard::MEDIA_TYPE.to_owned()),
        (
          header::CONTENT_DISPOSITION,
          format!("attachment; filename=\"{filename}\""),
        ),
      ],
      Bytes::from(payload),
    )
      .into_response(),
  )
}
