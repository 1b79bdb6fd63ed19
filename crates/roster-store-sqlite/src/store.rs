//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].
//!
//! Writes run as single `rusqlite` transactions on the connection thread:
//! the slug-namespace scan, allocation, and row writes commit together, so
//! concurrent saves serialize against each other and the `(language, slug)`
//! unique constraints can only trip on genuinely concurrent processes.

use std::{collections::HashSet, path::Path};

use chrono::Utc;
use roster_core::{
  embed::{PeopleEmbed, PersonCard},
  group::{Group, GroupTranslation, NewGroup},
  locale::{Locales, TranslationSet},
  person::{NewPerson, Person, PersonTranslation},
  slug::{self, SlugNamespace},
  store::{DirectoryStore, ListOrder, RecordKey},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    RawEmbed, RawGroup, RawPerson, decode_uuid, encode_dt, encode_image, encode_style,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A directory store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The
/// configured [`Locales`] drive slug-namespace scans and save-time language
/// validation.
#[derive(Clone)]
pub struct SqliteStore {
  conn:    tokio_rusqlite::Connection,
  locales: Locales,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>, locales: Locales) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, locales };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(locales: Locales) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, locales };
    store.init_schema().await?;
    Ok(store)
  }

  pub fn locales(&self) -> &Locales {
    &self.locales
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` on the connection thread, flattening the store-level result.
  async fn call<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut rusqlite::Connection) -> Result<T> + Send + 'static,
  {
    self.conn.call(move |conn| Ok(f(conn))).await?
  }
}

// ─── Constraint mapping ──────────────────────────────────────────────────────

fn is_unique_violation(e: &rusqlite::Error, needle: &str) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, Some(msg))
      if err.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains(needle)
  )
}

/// `UNIQUE` violations on `people.user_id` become a validation error; other
/// sqlite errors pass through.
fn map_user_conflict(e: rusqlite::Error, user: Option<Uuid>) -> Error {
  if let Some(user) = user
    && is_unique_violation(&e, "people.user_id")
  {
    return Error::UserAlreadyLinked(user);
  }
  Error::Sql(e)
}

/// `(language, slug)` violations mean a concurrent save won the race.
fn map_slug_conflict(e: rusqlite::Error, language: &str, slug: &str) -> Error {
  if is_unique_violation(&e, ".slug") {
    return Error::SlugConflict {
      language: language.to_owned(),
      slug:     slug.to_owned(),
    };
  }
  Error::Sql(e)
}

// ─── Slug allocation (sync, inside the save transaction) ─────────────────────

/// Collect every persisted slug for one entity type, excluding the record
/// being saved.
fn slug_namespace(
  conn:      &rusqlite::Connection,
  table:     &str,
  id_column: &str,
  exclude:   &str,
) -> Result<SlugNamespace> {
  let sql = format!("SELECT language, slug FROM {table} WHERE {id_column} != ?1");
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt.query_map(rusqlite::params![exclude], |row| {
    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
  })?;

  let mut ns = SlugNamespace::new();
  for row in rows {
    let (language, slug) = row?;
    ns.insert(language, slug);
  }
  Ok(ns)
}

fn ensure_known_languages<T>(
  translations: &TranslationSet<T>,
  locales:      &Locales,
) -> Result<()> {
  if let Some(unknown) = translations.languages().find(|&l| !locales.contains(l)) {
    return Err(roster_core::Error::UnknownLanguage(unknown.to_owned()).into());
  }
  Ok(())
}

fn allocate_person_slugs(
  person:  &mut Person,
  locales: &Locales,
  ns:      &SlugNamespace,
) -> Result<()> {
  ensure_known_languages(&person.translations, locales)?;
  for language in locales.languages() {
    let Some(tr) = person.translations.get_mut(language) else {
      continue;
    };
    let allocated =
      slug::allocate_slug(&tr.name, Some(&tr.slug), slug::UNNAMED_PERSON, language, ns)?;
    tr.slug = allocated;
  }
  Ok(())
}

fn allocate_group_slugs(
  group:   &mut Group,
  locales: &Locales,
  ns:      &SlugNamespace,
) -> Result<()> {
  ensure_known_languages(&group.translations, locales)?;
  for language in locales.languages() {
    let Some(tr) = group.translations.get_mut(language) else {
      continue;
    };
    let allocated =
      slug::allocate_slug(&tr.name, Some(&tr.slug), slug::UNNAMED_GROUP, language, ns)?;
    tr.slug = allocated;
  }
  Ok(())
}

fn dedup_ids(ids: &mut Vec<Uuid>) {
  let mut seen = HashSet::new();
  ids.retain(|id| seen.insert(*id));
}

// ─── People (sync helpers on the connection thread) ──────────────────────────

fn row_exists(conn: &rusqlite::Connection, sql: &str, id: &str) -> Result<bool> {
  Ok(
    conn
      .query_row(sql, rusqlite::params![id], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

fn write_person_tx(
  conn:            &mut rusqlite::Connection,
  mut person:      Person,
  locales:         &Locales,
  expect_existing: bool,
) -> Result<Person> {
  let tx = conn.transaction()?;
  let id_str = encode_uuid(person.person_id);

  if expect_existing
    && !row_exists(&tx, "SELECT 1 FROM people WHERE person_id = ?1", &id_str)?
  {
    return Err(Error::PersonNotFound(person.person_id));
  }

  let ns = slug_namespace(&tx, "person_translations", "person_id", &id_str)?;
  allocate_person_slugs(&mut person, locales, &ns)?;

  dedup_ids(&mut person.groups);
  for group_id in &person.groups {
    let gid = encode_uuid(*group_id);
    if !row_exists(&tx, "SELECT 1 FROM groups WHERE group_id = ?1", &gid)? {
      return Err(Error::GroupNotFound(*group_id));
    }
  }

  tx.execute(
    "INSERT INTO people (
       person_id, created_at, phone, mobile, fax, email, website,
       visual_json, vcard_enabled, user_id
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
     ON CONFLICT(person_id) DO UPDATE SET
       phone = excluded.phone, mobile = excluded.mobile, fax = excluded.fax,
       email = excluded.email, website = excluded.website,
       visual_json = excluded.visual_json,
       vcard_enabled = excluded.vcard_enabled, user_id = excluded.user_id",
    rusqlite::params![
      id_str,
      encode_dt(person.created_at),
      person.phone,
      person.mobile,
      person.fax,
      person.email,
      person.website,
      person.visual.as_ref().map(encode_image).transpose()?,
      person.vcard_enabled,
      person.user.map(encode_uuid),
    ],
  )
  .map_err(|e| map_user_conflict(e, person.user))?;

  tx.execute(
    "DELETE FROM person_translations WHERE person_id = ?1",
    rusqlite::params![id_str],
  )?;
  for (language, tr) in person.translations.iter() {
    tx.execute(
      "INSERT INTO person_translations (person_id, language, name, slug, function, description)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      rusqlite::params![id_str, language, tr.name, tr.slug, tr.function, tr.description],
    )
    .map_err(|e| map_slug_conflict(e, language, &tr.slug))?;
  }

  tx.execute(
    "DELETE FROM person_groups WHERE person_id = ?1",
    rusqlite::params![id_str],
  )?;
  for (position, group_id) in person.groups.iter().enumerate() {
    tx.execute(
      "INSERT INTO person_groups (person_id, group_id, position) VALUES (?1, ?2, ?3)",
      rusqlite::params![id_str, encode_uuid(*group_id), position as i64],
    )?;
  }

  tx.commit()?;
  Ok(person)
}

fn person_translations(
  conn: &rusqlite::Connection,
  id:   &str,
) -> Result<TranslationSet<PersonTranslation>> {
  let mut stmt = conn.prepare(
    "SELECT language, name, slug, function, description
     FROM person_translations WHERE person_id = ?1",
  )?;
  let rows = stmt.query_map(rusqlite::params![id], |row| {
    Ok((
      row.get::<_, String>(0)?,
      PersonTranslation {
        name:        row.get(1)?,
        slug:        row.get(2)?,
        function:    row.get(3)?,
        description: row.get(4)?,
      },
    ))
  })?;

  let mut set = TranslationSet::new();
  for row in rows {
    let (language, tr) = row?;
    set.insert(language, tr);
  }
  Ok(set)
}

fn person_group_ids(conn: &rusqlite::Connection, id: &str) -> Result<Vec<Uuid>> {
  let mut stmt = conn.prepare(
    "SELECT group_id FROM person_groups WHERE person_id = ?1 ORDER BY position",
  )?;
  let rows = stmt.query_map(rusqlite::params![id], |row| row.get::<_, String>(0))?;

  let mut ids = Vec::new();
  for row in rows {
    ids.push(decode_uuid(&row?)?);
  }
  Ok(ids)
}

fn read_person(conn: &rusqlite::Connection, id: &str) -> Result<Option<Person>> {
  let raw: Option<RawPerson> = conn
    .query_row(
      "SELECT person_id, created_at, phone, mobile, fax, email, website,
              visual_json, vcard_enabled, user_id
       FROM people WHERE person_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(RawPerson {
          person_id:     row.get(0)?,
          created_at:    row.get(1)?,
          phone:         row.get(2)?,
          mobile:        row.get(3)?,
          fax:           row.get(4)?,
          email:         row.get(5)?,
          website:       row.get(6)?,
          visual_json:   row.get(7)?,
          vcard_enabled: row.get(8)?,
          user_id:       row.get(9)?,
        })
      },
    )
    .optional()?;

  let Some(raw) = raw else { return Ok(None) };
  let translations = person_translations(conn, id)?;
  let groups = person_group_ids(conn, id)?;
  Ok(Some(raw.into_person(translations, groups)?))
}

fn find_person_tx(
  conn:     &rusqlite::Connection,
  language: &str,
  key:      &RecordKey,
) -> Result<Option<Person>> {
  match key {
    RecordKey::Id(id) => read_person(conn, &encode_uuid(*id)),
    RecordKey::Slug(slug) => {
      let id: Option<String> = conn
        .query_row(
          "SELECT person_id FROM person_translations WHERE language = ?1 AND slug = ?2",
          rusqlite::params![language, slug],
          |row| row.get(0),
        )
        .optional()?;
      match id {
        Some(id) => read_person(conn, &id),
        None => Ok(None),
      }
    }
  }
}

fn list_people_tx(conn: &rusqlite::Connection, order: &ListOrder) -> Result<Vec<Person>> {
  let ids: Vec<String> = match order {
    ListOrder::Created => {
      let mut stmt =
        conn.prepare("SELECT person_id FROM people ORDER BY created_at, person_id")?;
      let rows = stmt.query_map([], |row| row.get(0))?;
      rows.collect::<rusqlite::Result<_>>()?
    }
    ListOrder::Name { language } => {
      let mut stmt = conn.prepare(
        "SELECT p.person_id FROM people p
         LEFT JOIN person_translations t
           ON t.person_id = p.person_id AND t.language = ?1
         ORDER BY t.name IS NULL, t.name, p.person_id",
      )?;
      let rows = stmt.query_map(rusqlite::params![language], |row| row.get(0))?;
      rows.collect::<rusqlite::Result<_>>()?
    }
  };

  let mut people = Vec::with_capacity(ids.len());
  for id in &ids {
    if let Some(person) = read_person(conn, id)? {
      people.push(person);
    }
  }
  Ok(people)
}

// ─── Groups (sync helpers) ───────────────────────────────────────────────────

fn write_group_tx(
  conn:            &mut rusqlite::Connection,
  mut group:       Group,
  locales:         &Locales,
  expect_existing: bool,
) -> Result<Group> {
  let tx = conn.transaction()?;
  let id_str = encode_uuid(group.group_id);

  if expect_existing
    && !row_exists(&tx, "SELECT 1 FROM groups WHERE group_id = ?1", &id_str)?
  {
    return Err(Error::GroupNotFound(group.group_id));
  }

  let ns = slug_namespace(&tx, "group_translations", "group_id", &id_str)?;
  allocate_group_slugs(&mut group, locales, &ns)?;

  tx.execute(
    "INSERT INTO groups (
       group_id, created_at, address, postal_code, city, phone, fax, email, website
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
     ON CONFLICT(group_id) DO UPDATE SET
       address = excluded.address, postal_code = excluded.postal_code,
       city = excluded.city, phone = excluded.phone, fax = excluded.fax,
       email = excluded.email, website = excluded.website",
    rusqlite::params![
      id_str,
      encode_dt(group.created_at),
      group.address,
      group.postal_code,
      group.city,
      group.phone,
      group.fax,
      group.email,
      group.website,
    ],
  )?;

  tx.execute(
    "DELETE FROM group_translations WHERE group_id = ?1",
    rusqlite::params![id_str],
  )?;
  for (language, tr) in group.translations.iter() {
    tx.execute(
      "INSERT INTO group_translations (group_id, language, name, slug, description)
       VALUES (?1, ?2, ?3, ?4, ?5)",
      rusqlite::params![id_str, language, tr.name, tr.slug, tr.description],
    )
    .map_err(|e| map_slug_conflict(e, language, &tr.slug))?;
  }

  tx.commit()?;
  Ok(group)
}

fn group_translations(
  conn: &rusqlite::Connection,
  id:   &str,
) -> Result<TranslationSet<GroupTranslation>> {
  let mut stmt = conn.prepare(
    "SELECT language, name, slug, description
     FROM group_translations WHERE group_id = ?1",
  )?;
  let rows = stmt.query_map(rusqlite::params![id], |row| {
    Ok((
      row.get::<_, String>(0)?,
      GroupTranslation {
        name:        row.get(1)?,
        slug:        row.get(2)?,
        description: row.get(3)?,
      },
    ))
  })?;

  let mut set = TranslationSet::new();
  for row in rows {
    let (language, tr) = row?;
    set.insert(language, tr);
  }
  Ok(set)
}

fn read_group(conn: &rusqlite::Connection, id: &str) -> Result<Option<Group>> {
  let raw: Option<RawGroup> = conn
    .query_row(
      "SELECT group_id, created_at, address, postal_code, city, phone, fax, email, website
       FROM groups WHERE group_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(RawGroup {
          group_id:    row.get(0)?,
          created_at:  row.get(1)?,
          address:     row.get(2)?,
          postal_code: row.get(3)?,
          city:        row.get(4)?,
          phone:       row.get(5)?,
          fax:         row.get(6)?,
          email:       row.get(7)?,
          website:     row.get(8)?,
        })
      },
    )
    .optional()?;

  let Some(raw) = raw else { return Ok(None) };
  let translations = group_translations(conn, id)?;
  Ok(Some(raw.into_group(translations)?))
}

fn find_group_tx(
  conn:     &rusqlite::Connection,
  language: &str,
  key:      &RecordKey,
) -> Result<Option<Group>> {
  match key {
    RecordKey::Id(id) => read_group(conn, &encode_uuid(*id)),
    RecordKey::Slug(slug) => {
      let id: Option<String> = conn
        .query_row(
          "SELECT group_id FROM group_translations WHERE language = ?1 AND slug = ?2",
          rusqlite::params![language, slug],
          |row| row.get(0),
        )
        .optional()?;
      match id {
        Some(id) => read_group(conn, &id),
        None => Ok(None),
      }
    }
  }
}

fn list_groups_tx(conn: &rusqlite::Connection, order: &ListOrder) -> Result<Vec<Group>> {
  let ids: Vec<String> = match order {
    ListOrder::Created => {
      let mut stmt =
        conn.prepare("SELECT group_id FROM groups ORDER BY created_at, group_id")?;
      let rows = stmt.query_map([], |row| row.get(0))?;
      rows.collect::<rusqlite::Result<_>>()?
    }
    ListOrder::Name { language } => {
      let mut stmt = conn.prepare(
        "SELECT g.group_id FROM groups g
         LEFT JOIN group_translations t
           ON t.group_id = g.group_id AND t.language = ?1
         ORDER BY t.name IS NULL, t.name, g.group_id",
      )?;
      let rows = stmt.query_map(rusqlite::params![language], |row| row.get(0))?;
      rows.collect::<rusqlite::Result<_>>()?
    }
  };

  let mut groups = Vec::with_capacity(ids.len());
  for id in &ids {
    if let Some(group) = read_group(conn, id)? {
      groups.push(group);
    }
  }
  Ok(groups)
}

// ─── Embeds (sync helpers) ───────────────────────────────────────────────────

fn write_embed_tx(conn: &mut rusqlite::Connection, mut embed: PeopleEmbed) -> Result<PeopleEmbed> {
  let tx = conn.transaction()?;
  let id_str = encode_uuid(embed.embed_id);

  dedup_ids(&mut embed.people);
  for person_id in &embed.people {
    let pid = encode_uuid(*person_id);
    if !row_exists(&tx, "SELECT 1 FROM people WHERE person_id = ?1", &pid)? {
      return Err(Error::PersonNotFound(*person_id));
    }
  }

  tx.execute(
    "INSERT INTO embeds (embed_id, style, group_by_group, show_links, show_vcard)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT(embed_id) DO UPDATE SET
       style = excluded.style, group_by_group = excluded.group_by_group,
       show_links = excluded.show_links, show_vcard = excluded.show_vcard",
    rusqlite::params![
      id_str,
      encode_style(&embed.style),
      embed.group_by_group,
      embed.show_links,
      embed.show_vcard,
    ],
  )?;

  tx.execute(
    "DELETE FROM embed_people WHERE embed_id = ?1",
    rusqlite::params![id_str],
  )?;
  for (position, person_id) in embed.people.iter().enumerate() {
    tx.execute(
      "INSERT INTO embed_people (embed_id, person_id, position) VALUES (?1, ?2, ?3)",
      rusqlite::params![id_str, encode_uuid(*person_id), position as i64],
    )?;
  }

  tx.commit()?;
  Ok(embed)
}

fn read_embed(conn: &rusqlite::Connection, id: &str) -> Result<Option<PeopleEmbed>> {
  let raw: Option<RawEmbed> = conn
    .query_row(
      "SELECT embed_id, style, group_by_group, show_links, show_vcard
       FROM embeds WHERE embed_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(RawEmbed {
          embed_id:       row.get(0)?,
          style:          row.get(1)?,
          group_by_group: row.get(2)?,
          show_links:     row.get(3)?,
          show_vcard:     row.get(4)?,
        })
      },
    )
    .optional()?;

  let Some(raw) = raw else { return Ok(None) };

  let mut stmt = conn.prepare(
    "SELECT person_id FROM embed_people WHERE embed_id = ?1 ORDER BY position",
  )?;
  let rows = stmt.query_map(rusqlite::params![id], |row| row.get::<_, String>(0))?;
  let mut people = Vec::new();
  for row in rows {
    people.push(decode_uuid(&row?)?);
  }

  Ok(Some(raw.into_embed(people)?))
}

fn selected_people_tx(conn: &rusqlite::Connection, embed_id: Uuid) -> Result<Vec<PersonCard>> {
  let embed = read_embed(conn, &encode_uuid(embed_id))?
    .ok_or(Error::EmbedNotFound(embed_id))?;

  let mut cards = Vec::with_capacity(embed.people.len());
  for person_id in &embed.people {
    let Some(person) = read_person(conn, &encode_uuid(*person_id))? else {
      continue;
    };
    let primary_group = match person.primary_group() {
      Some(group_id) => read_group(conn, &encode_uuid(group_id))?,
      None => None,
    };
    cards.push(PersonCard { person, primary_group });
  }
  Ok(cards)
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    let person = input.into_person(Uuid::new_v4(), Utc::now());
    let locales = self.locales.clone();
    self
      .call(move |conn| write_person_tx(conn, person, &locales, false))
      .await
  }

  async fn update_person(&self, person: Person) -> Result<Person> {
    let locales = self.locales.clone();
    self
      .call(move |conn| write_person_tx(conn, person, &locales, true))
      .await
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);
    self.call(move |conn| read_person(conn, &id_str)).await
  }

  async fn find_person(&self, language: &str, key: &RecordKey) -> Result<Option<Person>> {
    let language = language.to_owned();
    let key = key.clone();
    self
      .call(move |conn| find_person_tx(conn, &language, &key))
      .await
  }

  async fn list_people(&self, order: ListOrder) -> Result<Vec<Person>> {
    self.call(move |conn| list_people_tx(conn, &order)).await
  }

  async fn delete_person(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let deleted = self
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE person_id = ?1", rusqlite::params![id_str])?)
      })
      .await?;
    if deleted == 0 {
      return Err(Error::PersonNotFound(id));
    }
    Ok(())
  }

  // ── Groups ────────────────────────────────────────────────────────────────

  async fn create_group(&self, input: NewGroup) -> Result<Group> {
    let group = input.into_group(Uuid::new_v4(), Utc::now());
    let locales = self.locales.clone();
    self
      .call(move |conn| write_group_tx(conn, group, &locales, false))
      .await
  }

  async fn update_group(&self, group: Group) -> Result<Group> {
    let locales = self.locales.clone();
    self
      .call(move |conn| write_group_tx(conn, group, &locales, true))
      .await
  }

  async fn get_group(&self, id: Uuid) -> Result<Option<Group>> {
    let id_str = encode_uuid(id);
    self.call(move |conn| read_group(conn, &id_str)).await
  }

  async fn find_group(&self, language: &str, key: &RecordKey) -> Result<Option<Group>> {
    let language = language.to_owned();
    let key = key.clone();
    self
      .call(move |conn| find_group_tx(conn, &language, &key))
      .await
  }

  async fn list_groups(&self, order: ListOrder) -> Result<Vec<Group>> {
    self.call(move |conn| list_groups_tx(conn, &order)).await
  }

  async fn delete_group(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let deleted = self
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM groups WHERE group_id = ?1", rusqlite::params![id_str])?)
      })
      .await?;
    if deleted == 0 {
      return Err(Error::GroupNotFound(id));
    }
    Ok(())
  }

  // ── Embeds ────────────────────────────────────────────────────────────────

  async fn save_embed(&self, embed: PeopleEmbed) -> Result<PeopleEmbed> {
    self.call(move |conn| write_embed_tx(conn, embed)).await
  }

  async fn get_embed(&self, id: Uuid) -> Result<Option<PeopleEmbed>> {
    let id_str = encode_uuid(id);
    self.call(move |conn| read_embed(conn, &id_str)).await
  }

  async fn selected_people(&self, embed_id: Uuid) -> Result<Vec<PersonCard>> {
    self
      .call(move |conn| selected_people_tx(conn, embed_id))
      .await
  }
}
