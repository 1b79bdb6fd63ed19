//! Unique-slug assignment across per-language namespaces.
//!
//! Allocation is a pure function over a [`SlugNamespace`] snapshot. Storage
//! backends collect the snapshot (excluding the record being saved) inside
//! their save transaction and persist the returned value atomically, so two
//! concurrent saves cannot both observe a candidate as free.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// Placeholder candidate for a person saved with an empty name.
pub const UNNAMED_PERSON: &str = "unnamed-person";
/// Placeholder candidate for a group saved with an empty name.
pub const UNNAMED_GROUP: &str = "unnamed-group";

/// Upper bound on suffix probing before allocation fails with
/// [`Error::SlugExhausted`].
pub const MAX_SUFFIX_ATTEMPTS: u64 = 10_000;

// ─── Slugify ─────────────────────────────────────────────────────────────────

/// Convert a label to its URL-safe form: lowercased, alphanumerics kept,
/// every other run of characters collapsed to a single hyphen. Leading and
/// trailing separators are dropped, so the result is empty only when the
/// label contains no alphanumerics at all.
pub fn slugify(label: &str) -> String {
  let mut out = String::with_capacity(label.len());
  let mut pending = false;
  for c in label.chars() {
    if c.is_alphanumeric() {
      if pending && !out.is_empty() {
        out.push('-');
      }
      pending = false;
      for lc in c.to_lowercase() {
        out.push(lc);
      }
    } else {
      pending = true;
    }
  }
  out
}

// ─── Namespace snapshot ──────────────────────────────────────────────────────

/// Snapshot of the slugs persisted for one entity type, keyed by language.
/// The record being saved must be excluded when building the snapshot —
/// that is what makes re-saving an unchanged record idempotent.
#[derive(Debug, Clone, Default)]
pub struct SlugNamespace {
  by_language: BTreeMap<String, BTreeSet<String>>,
}

impl SlugNamespace {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, language: impl Into<String>, slug: impl Into<String>) {
    self
      .by_language
      .entry(language.into())
      .or_default()
      .insert(slug.into());
  }

  /// Is `slug` already taken within `language`?
  pub fn is_taken(&self, language: &str, slug: &str) -> bool {
    self
      .by_language
      .get(language)
      .is_some_and(|slugs| slugs.contains(slug))
  }

  /// Slugs in *any* language starting with one of `prefixes`. An empty
  /// prefix matches everything, so an empty label excludes the whole
  /// snapshot — the suffix search then probes past every persisted slug.
  fn matching(&self, prefixes: &[&str]) -> BTreeSet<&str> {
    self
      .by_language
      .values()
      .flatten()
      .filter(|slug| prefixes.iter().any(|p| slug.starts_with(p)))
      .map(String::as_str)
      .collect()
  }
}

// ─── Allocation ──────────────────────────────────────────────────────────────

/// Assign a slug for a record labelled `label` in `language`.
///
/// A non-empty `existing_slug` is reused as the candidate without
/// re-deriving from the label, but it is still collision-checked so a
/// manually entered duplicate cannot break per-language uniqueness. When the
/// candidate collides, the suffix search excludes prefix-matching slugs from
/// every language in `namespace` — not just the current one — and takes the
/// lowest free `_<i>` suffix. Deterministic for a given snapshot.
pub fn allocate_slug(
  label:         &str,
  existing_slug: Option<&str>,
  placeholder:   &str,
  language:      &str,
  namespace:     &SlugNamespace,
) -> Result<String> {
  let existing = existing_slug.unwrap_or("").trim();
  let mut candidate = if existing.is_empty() {
    slugify(label)
  } else {
    existing.to_owned()
  };
  if candidate.is_empty() {
    candidate = placeholder.to_owned();
  }

  if !namespace.is_taken(language, &candidate) {
    return Ok(candidate);
  }

  let excluded = namespace.matching(&[label, &candidate]);

  // The suffix base is re-derived from the label; the candidate only stands
  // in when the label slugifies to nothing.
  let derived = slugify(label);
  let suffix_base = if derived.is_empty() { candidate.as_str() } else { derived.as_str() };

  for i in 1..=MAX_SUFFIX_ATTEMPTS {
    let attempt = format!("{suffix_base}_{i}");
    if !excluded.contains(attempt.as_str()) && !namespace.is_taken(language, &attempt) {
      return Ok(attempt);
    }
  }

  Err(Error::SlugExhausted(suffix_base.to_owned()))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
