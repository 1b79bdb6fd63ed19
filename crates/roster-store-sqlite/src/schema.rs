//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS people (
    person_id     TEXT PRIMARY KEY,
    created_at    TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    phone         TEXT,
    mobile        TEXT,
    fax           TEXT,
    email         TEXT,
    website       TEXT,
    visual_json   TEXT,            -- JSON ImageRef or NULL
    vcard_enabled INTEGER NOT NULL DEFAULT 1,
    user_id       TEXT UNIQUE      -- external identity link; one person per user
);

-- One row per (person, language). The UNIQUE (language, slug) pair is the
-- storage-level backstop behind the in-transaction slug allocation.
CREATE TABLE IF NOT EXISTS person_translations (
    person_id   TEXT NOT NULL REFERENCES people(person_id) ON DELETE CASCADE,
    language    TEXT NOT NULL,
    name        TEXT NOT NULL DEFAULT '',
    slug        TEXT NOT NULL,
    function    TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (person_id, language),
    UNIQUE (language, slug)
);

CREATE TABLE IF NOT EXISTS groups (
    group_id    TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    address     TEXT,
    postal_code TEXT,
    city        TEXT,
    phone       TEXT,
    fax         TEXT,
    email       TEXT,
    website     TEXT
);

CREATE TABLE IF NOT EXISTS group_translations (
    group_id    TEXT NOT NULL REFERENCES groups(group_id) ON DELETE CASCADE,
    language    TEXT NOT NULL,
    name        TEXT NOT NULL DEFAULT '',
    slug        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (group_id, language),
    UNIQUE (language, slug)
);

-- Ordered many-to-many; position 0 is the primary group. Deleting a group
-- drops the membership rows, never the people.
CREATE TABLE IF NOT EXISTS person_groups (
    person_id TEXT NOT NULL REFERENCES people(person_id) ON DELETE CASCADE,
    group_id  TEXT NOT NULL REFERENCES groups(group_id) ON DELETE CASCADE,
    position  INTEGER NOT NULL,
    PRIMARY KEY (person_id, group_id)
);

CREATE TABLE IF NOT EXISTS embeds (
    embed_id       TEXT PRIMARY KEY,
    style          TEXT NOT NULL DEFAULT 'standard',
    group_by_group INTEGER NOT NULL DEFAULT 1,
    show_links     INTEGER NOT NULL DEFAULT 0,
    show_vcard     INTEGER NOT NULL DEFAULT 0
);

-- Ordered many-to-many between embed configurations and people.
CREATE TABLE IF NOT EXISTS embed_people (
    embed_id  TEXT NOT NULL REFERENCES embeds(embed_id) ON DELETE CASCADE,
    person_id TEXT NOT NULL REFERENCES people(person_id) ON DELETE CASCADE,
    position  INTEGER NOT NULL,
    PRIMARY KEY (embed_id, person_id)
);

CREATE INDEX IF NOT EXISTS person_translations_slug_idx ON person_translations(language, slug);
CREATE INDEX IF NOT EXISTS group_translations_slug_idx  ON group_translations(language, slug);
CREATE INDEX IF NOT EXISTS person_groups_person_idx     ON person_groups(person_id, position);
CREATE INDEX IF NOT EXISTS embed_people_embed_idx       ON embed_people(embed_id, position);

PRAGMA user_version = 1;
";
