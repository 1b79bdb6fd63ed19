//! Person — a directory entry for an individual.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::{Locales, TranslationSet};

// ─── Image reference ─────────────────────────────────────────────────────────

/// A stored image reference. `path` addresses the raw bytes in file storage;
/// `url` is the public location used when the bytes cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
  pub path:      String,
  pub url:       String,
  /// File extension without the dot, e.g. `"jpg"`.
  pub extension: String,
}

// ─── Translated fields ───────────────────────────────────────────────────────

/// Translated fields of a [`Person`], one instance per language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonTranslation {
  pub name:        String,
  /// Unique within this language's person namespace; allocated on save when
  /// empty.
  #[serde(default)]
  pub slug:        String,
  /// Role or job title shown alongside the name.
  #[serde(default)]
  pub function:    String,
  #[serde(default)]
  pub description: String,
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A person record: per-language translations plus language-invariant
/// contact fields and an ordered group membership list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:     Uuid,
  /// Store-assigned; never changes after creation.
  pub created_at:    DateTime<Utc>,
  pub translations:  TranslationSet<PersonTranslation>,
  pub phone:         Option<String>,
  pub mobile:        Option<String>,
  pub fax:           Option<String>,
  pub email:         Option<String>,
  pub website:       Option<String>,
  /// Ordered group references; the first entry is the primary group.
  pub groups:        Vec<Uuid>,
  pub visual:        Option<ImageRef>,
  pub vcard_enabled: bool,
  /// Optional link to an external user identity; unique across people.
  pub user:          Option<Uuid>,
}

impl Person {
  /// The first group of the ordered list, if any.
  pub fn primary_group(&self) -> Option<Uuid> {
    self.groups.first().copied()
  }

  /// The slug for `language`, if that exact translation exists and has one.
  /// Fallback chains are deliberately not consulted.
  pub fn slug(&self, language: &str) -> Option<&str> {
    self
      .translations
      .get(language)
      .map(|t| t.slug.as_str())
      .filter(|s| !s.is_empty())
  }

  /// Language-resolved name with a neutral placeholder when untranslated.
  /// Never fails.
  pub fn display_name(&self, language: &str, locales: &Locales) -> String {
    self
      .translations
      .resolve(language, locales)
      .map(|t| t.name.trim())
      .filter(|n| !n.is_empty())
      .map(str::to_owned)
      .unwrap_or_else(|| format!("Person: {}", self.person_id))
  }

  /// Language-resolved function/role; `None` when absent or blank.
  pub fn function(&self, language: &str, locales: &Locales) -> Option<&str> {
    self
      .translations
      .resolve(language, locales)
      .map(|t| t.function.as_str())
      .filter(|f| !f.trim().is_empty())
  }
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::DirectoryStore::create_person`].
/// The id and creation timestamp are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPerson {
  pub translations:  TranslationSet<PersonTranslation>,
  pub phone:         Option<String>,
  pub mobile:        Option<String>,
  pub fax:           Option<String>,
  pub email:         Option<String>,
  pub website:       Option<String>,
  pub groups:        Vec<Uuid>,
  pub visual:        Option<ImageRef>,
  pub vcard_enabled: bool,
  pub user:          Option<Uuid>,
}

impl Default for NewPerson {
  fn default() -> Self {
    Self {
      translations:  TranslationSet::new(),
      phone:         None,
      mobile:        None,
      fax:           None,
      email:         None,
      website:       None,
      groups:        Vec::new(),
      visual:        None,
      vcard_enabled: true,
      user:          None,
    }
  }
}

impl NewPerson {
  /// Materialise with a store-assigned id and timestamp.
  pub fn into_person(self, person_id: Uuid, created_at: DateTime<Utc>) -> Person {
    Person {
      person_id,
      created_at,
      translations: self.translations,
      phone: self.phone,
      mobile: self.mobile,
      fax: self.fax,
      email: self.email,
      website: self.website,
      groups: self.groups,
      visual: self.visual,
      vcard_enabled: self.vcard_enabled,
      user: self.user,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn person(translations: TranslationSet<PersonTranslation>) -> Person {
    NewPerson {
      translations,
      ..NewPerson::default()
    }
    .into_person(Uuid::new_v4(), Utc::now())
  }

  #[test]
  fn primary_group_is_first() {
    let (g1, g2, g3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let mut p = person(TranslationSet::new());
    p.groups = vec![g2, g1, g3];
    assert_eq!(p.primary_group(), Some(g2));
  }

  #[test]
  fn display_name_falls_back_to_placeholder() {
    let p = person(TranslationSet::new());
    let locales = Locales::default();
    assert_eq!(p.display_name("en", &locales), format!("Person: {}", p.person_id));
  }

  #[test]
  fn display_name_ignores_blank_translations() {
    let p = person(TranslationSet::new().with("en", PersonTranslation {
      name: "   ".into(),
      ..PersonTranslation::default()
    }));
    let locales = Locales::default();
    assert!(p.display_name("en", &locales).starts_with("Person: "));
  }

  #[test]
  fn slug_requires_exact_language() {
    let p = person(TranslationSet::new().with("en", PersonTranslation {
      name: "Alice".into(),
      slug: "alice".into(),
      ..PersonTranslation::default()
    }));
    assert_eq!(p.slug("en"), Some("alice"));
    assert_eq!(p.slug("de"), None);
  }
}
