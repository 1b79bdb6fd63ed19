//! Canonical detail-page paths, localized per language.
//!
//! Paths are keyed by the exact-language slug when one exists and fall back
//! to the record id otherwise. Translation fallback chains are deliberately
//! not consulted: a slug from another language must never leak into a
//! localized URL namespace.

use crate::{group::Group, person::Person};

/// `/{language}/people/{slug}/`, or `/{language}/people/id/{uuid}/` when the
/// person has no slug in that exact language.
pub fn person_detail_path(person: &Person, language: &str) -> String {
  match person.slug(language) {
    Some(slug) => format!("/{language}/people/{slug}/"),
    None => format!("/{language}/people/id/{}/", person.person_id),
  }
}

/// `/{language}/groups/{slug}/`, or `/{language}/groups/id/{uuid}/` when the
/// group has no slug in that exact language.
pub fn group_detail_path(group: &Group, language: &str) -> String {
  match group.slug(language) {
    Some(slug) => format!("/{language}/groups/{slug}/"),
    None => format!("/{language}/groups/id/{}/", group.group_id),
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::{
    group::NewGroup,
    locale::TranslationSet,
    person::{NewPerson, PersonTranslation},
  };

  #[test]
  fn person_path_uses_slug_when_translated() {
    let person = NewPerson {
      translations: TranslationSet::new().with("en", PersonTranslation {
        name: "Jane Doe".into(),
        slug: "jane-doe".into(),
        ..PersonTranslation::default()
      }),
      ..NewPerson::default()
    }
    .into_person(Uuid::new_v4(), Utc::now());

    assert_eq!(person_detail_path(&person, "en"), "/en/people/jane-doe/");
  }

  #[test]
  fn person_path_falls_back_to_id() {
    let person = NewPerson::default().into_person(Uuid::new_v4(), Utc::now());
    let path = person_detail_path(&person, "de");
    assert_eq!(path, format!("/de/people/id/{}/", person.person_id));
  }

  #[test]
  fn group_path_does_not_borrow_other_languages() {
    let group = NewGroup {
      translations: TranslationSet::new().with("en", crate::group::GroupTranslation {
        name: "Engineering".into(),
        slug: "engineering".into(),
        ..crate::group::GroupTranslation::default()
      }),
      ..NewGroup::default()
    }
    .into_group(Uuid::new_v4(), Utc::now());

    // The en slug exists, but a de URL must not use it.
    let path = group_detail_path(&group, "de");
    assert_eq!(path, format!("/de/groups/id/{}/", group.group_id));
  }
}
