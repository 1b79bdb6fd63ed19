//! Language configuration and per-language translation storage.
//!
//! The configured language set is an explicit value handed to stores at
//! construction time. Fallback chains are consulted only when *reading*
//! translated fields; slug allocation always works on exact languages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── Locales ─────────────────────────────────────────────────────────────────

/// The host-configured language set: an ordered list of language codes plus
/// optional per-language fallback chains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locales {
  languages: Vec<String>,
  #[serde(default)]
  fallbacks: BTreeMap<String, Vec<String>>,
}

impl Locales {
  pub fn new<I, S>(languages: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      languages: languages.into_iter().map(Into::into).collect(),
      fallbacks: BTreeMap::new(),
    }
  }

  /// Register the fallback chain consulted when `language` has no
  /// translation, in priority order.
  pub fn with_fallbacks<I, S>(mut self, language: impl Into<String>, chain: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .fallbacks
      .insert(language.into(), chain.into_iter().map(Into::into).collect());
    self
  }

  /// Configured languages, in priority order.
  pub fn languages(&self) -> &[String] {
    &self.languages
  }

  /// The first configured language.
  pub fn default_language(&self) -> &str {
    self.languages.first().map(String::as_str).unwrap_or("en")
  }

  pub fn contains(&self, language: &str) -> bool {
    self.languages.iter().any(|l| l == language)
  }

  /// The fallback chain for `language`; empty when none is configured.
  pub fn fallbacks(&self, language: &str) -> &[String] {
    self
      .fallbacks
      .get(language)
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }
}

impl Default for Locales {
  fn default() -> Self {
    Self::new(["en"])
  }
}

// ─── TranslationSet ──────────────────────────────────────────────────────────

/// Per-language translated fields of a record, stored as an embedded map
/// from language code to the translated value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSet<T>(BTreeMap<String, T>);

impl<T> Default for TranslationSet<T> {
  fn default() -> Self {
    Self(BTreeMap::new())
  }
}

impl<T> TranslationSet<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style insert, mostly for tests and fixtures.
  pub fn with(mut self, language: impl Into<String>, value: T) -> Self {
    self.insert(language, value);
    self
  }

  pub fn insert(&mut self, language: impl Into<String>, value: T) {
    self.0.insert(language.into(), value);
  }

  /// Exact-language lookup; no fallback.
  pub fn get(&self, language: &str) -> Option<&T> {
    self.0.get(language)
  }

  pub fn get_mut(&mut self, language: &str) -> Option<&mut T> {
    self.0.get_mut(language)
  }

  /// The requested language, then its configured fallback chain.
  /// `None` when the record is untranslated for all of them.
  pub fn resolve<'a>(&'a self, language: &str, locales: &Locales) -> Option<&'a T> {
    if let Some(value) = self.0.get(language) {
      return Some(value);
    }
    locales
      .fallbacks(language)
      .iter()
      .find_map(|fb| self.0.get(fb.as_str()))
  }

  /// Languages this record is translated into.
  pub fn languages(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn locales() -> Locales {
    Locales::new(["en", "de", "fr"]).with_fallbacks("de", ["en"])
  }

  #[test]
  fn resolve_prefers_exact_language() {
    let set = TranslationSet::new().with("en", "hello").with("de", "hallo");
    assert_eq!(set.resolve("de", &locales()), Some(&"hallo"));
  }

  #[test]
  fn resolve_walks_fallback_chain() {
    let set = TranslationSet::new().with("en", "hello");
    assert_eq!(set.resolve("de", &locales()), Some(&"hello"));
  }

  #[test]
  fn resolve_without_fallback_returns_none() {
    let set = TranslationSet::new().with("en", "hello");
    // "fr" has no fallback chain configured.
    assert_eq!(set.resolve("fr", &locales()), None);
  }

  #[test]
  fn get_is_exact_only() {
    let set = TranslationSet::new().with("en", "hello");
    assert_eq!(set.get("de"), None);
  }

  #[test]
  fn default_language_is_first_configured() {
    assert_eq!(locales().default_language(), "en");
  }
}
