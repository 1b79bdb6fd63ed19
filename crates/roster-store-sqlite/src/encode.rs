//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, booleans as 0/1 integers, and the image reference as compact
//! JSON.

use chrono::{DateTime, Utc};
use roster_core::{
  embed::{EmbedStyle, PeopleEmbed},
  group::{Group, GroupTranslation},
  locale::TranslationSet,
  person::{ImageRef, Person, PersonTranslation},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ImageRef ────────────────────────────────────────────────────────────────

pub fn encode_image(image: &ImageRef) -> Result<String> {
  Ok(serde_json::to_string(image)?)
}

pub fn decode_image(s: &str) -> Result<ImageRef> {
  Ok(serde_json::from_str(s)?)
}

// ─── EmbedStyle ──────────────────────────────────────────────────────────────

pub fn encode_style(style: &EmbedStyle) -> String { style.as_str().to_owned() }

pub fn decode_style(s: &str) -> EmbedStyle { EmbedStyle::parse(s) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `people` row; translations and group
/// references are attached afterwards.
pub struct RawPerson {
  pub person_id:     String,
  pub created_at:    String,
  pub phone:         Option<String>,
  pub mobile:        Option<String>,
  pub fax:           Option<String>,
  pub email:         Option<String>,
  pub website:       Option<String>,
  pub visual_json:   Option<String>,
  pub vcard_enabled: bool,
  pub user_id:       Option<String>,
}

impl RawPerson {
  pub fn into_person(
    self,
    translations: TranslationSet<PersonTranslation>,
    groups: Vec<Uuid>,
  ) -> Result<Person> {
    Ok(Person {
      person_id:     decode_uuid(&self.person_id)?,
      created_at:    decode_dt(&self.created_at)?,
      translations,
      phone:         self.phone,
      mobile:        self.mobile,
      fax:           self.fax,
      email:         self.email,
      website:       self.website,
      groups,
      visual:        self.visual_json.as_deref().map(decode_image).transpose()?,
      vcard_enabled: self.vcard_enabled,
      user:          self.user_id.as_deref().map(decode_uuid).transpose()?,
    })
  }
}

/// Raw strings read directly from a `groups` row.
pub struct RawGroup {
  pub group_id:    String,
  pub created_at:  String,
  pub address:     Option<String>,
  pub postal_code: Option<String>,
  pub city:        Option<String>,
  pub phone:       Option<String>,
  pub fax:         Option<String>,
  pub email:       Option<String>,
  pub website:     Option<String>,
}

impl RawGroup {
  pub fn into_group(self, translations: TranslationSet<GroupTranslation>) -> Result<Group> {
    Ok(Group {
      group_id:    decode_uuid(&self.group_id)?,
      created_at:  decode_dt(&self.created_at)?,
      translations,
      address:     self.address,
      postal_code: self.postal_code,
      city:        self.city,
      phone:       self.phone,
      fax:         self.fax,
      email:       self.email,
      website:     self.website,
    })
  }
}

/// Raw strings read directly from an `embeds` row.
pub struct RawEmbed {
  pub embed_id:       String,
  pub style:          String,
  pub group_by_group: bool,
  pub show_links:     bool,
  pub show_vcard:     bool,
}

impl RawEmbed {
  pub fn into_embed(self, people: Vec<Uuid>) -> Result<PeopleEmbed> {
    Ok(PeopleEmbed {
      embed_id:       decode_uuid(&self.embed_id)?,
      style:          decode_style(&self.style),
      people,
      group_by_group: self.group_by_group,
      show_links:     self.show_links,
      show_vcard:     self.show_vcard,
    })
  }
}
