//! Group — an organisational unit people belong to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::{Locales, TranslationSet};

// ─── Translated fields ───────────────────────────────────────────────────────

/// Translated fields of a [`Group`], one instance per language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupTranslation {
  pub name:        String,
  /// Unique within this language's group namespace; allocated on save when
  /// empty.
  #[serde(default)]
  pub slug:        String,
  #[serde(default)]
  pub description: String,
}

// ─── Group ───────────────────────────────────────────────────────────────────

/// A group record: per-language translations plus language-invariant
/// contact fields. Groups are referenced (not owned) by people.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
  pub group_id:    Uuid,
  /// Store-assigned; never changes after creation.
  pub created_at:  DateTime<Utc>,
  pub translations: TranslationSet<GroupTranslation>,
  /// Street address; may span multiple lines.
  pub address:     Option<String>,
  pub postal_code: Option<String>,
  pub city:        Option<String>,
  pub phone:       Option<String>,
  pub fax:         Option<String>,
  pub email:       Option<String>,
  pub website:     Option<String>,
}

impl Group {
  /// The slug for `language`, if that exact translation exists and has one.
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
      .unwrap_or_else(|| format!("Group: {}", self.group_id))
  }
}

// ─── NewGroup ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::DirectoryStore::create_group`].
/// The id and creation timestamp are always assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewGroup {
  pub translations: TranslationSet<GroupTranslation>,
  pub address:     Option<String>,
  pub postal_code: Option<String>,
  pub city:        Option<String>,
  pub phone:       Option<String>,
  pub fax:         Option<String>,
  pub email:       Option<String>,
  pub website:     Option<String>,
}

impl NewGroup {
  /// Materialise with a store-assigned id and timestamp.
  pub fn into_group(self, group_id: Uuid, created_at: DateTime<Utc>) -> Group {
    Group {
      group_id,
      created_at,
      translations: self.translations,
      address: self.address,
      postal_code: self.postal_code,
      city: self.city,
      phone: self.phone,
      fax: self.fax,
      email: self.email,
      website: self.website,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_name_resolves_translation() {
    let group = NewGroup {
      translations: TranslationSet::new().with("en", GroupTranslation {
        name: "Engineering".into(),
        ..GroupTranslation::default()
      }),
      ..NewGroup::default()
    }
    .into_group(Uuid::new_v4(), Utc::now());

    let locales = Locales::new(["en", "de"]).with_fallbacks("de", ["en"]);
    assert_eq!(group.display_name("en", &locales), "Engineering");
    assert_eq!(group.display_name("de", &locales), "Engineering");
  }

  #[test]
  fn display_name_placeholder_names_the_record() {
    let group = NewGroup::default().into_group(Uuid::new_v4(), Utc::now());
    let name = group.display_name("en", &Locales::default());
    assert_eq!(name, format!("Group: {}", group.group_id));
  }
}
