//! Embedding configuration — a curated, ordered people list attached to a
//! page region by the host platform.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{group::Group, person::Person};

// ─── Style ───────────────────────────────────────────────────────────────────

/// Display style for an embedded people list. Hosts may define styles beyond
/// the built-in pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedStyle {
  #[default]
  Standard,
  Feature,
  Custom(String),
}

impl EmbedStyle {
  /// The stable identifier stored in the database and used by templates.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Standard => "standard",
      Self::Feature => "feature",
      Self::Custom(s) => s,
    }
  }

  pub fn parse(s: &str) -> Self {
    match s {
      "standard" => Self::Standard,
      "feature" => Self::Feature,
      other => Self::Custom(other.to_owned()),
    }
  }
}

// ─── Configuration ───────────────────────────────────────────────────────────

/// A page-attached, user-curated subset of people plus display options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleEmbed {
  pub embed_id:       Uuid,
  pub style:          EmbedStyle,
  /// Ordered person references; rendering preserves this order.
  pub people:         Vec<Uuid>,
  pub group_by_group: bool,
  pub show_links:     bool,
  pub show_vcard:     bool,
}

impl PeopleEmbed {
  pub fn new(embed_id: Uuid) -> Self {
    Self {
      embed_id,
      style: EmbedStyle::Standard,
      people: Vec::new(),
      group_by_group: true,
      show_links: false,
      show_vcard: false,
    }
  }

  /// Take over the ordered people list when the owning page element is
  /// duplicated. Copies the reference list, not the records it points at.
  pub fn copy_relations(&mut self, source: &Self) {
    self.people = source.people.clone();
  }
}

// ─── Render projection ───────────────────────────────────────────────────────

/// A person resolved for rendering, with the primary-group projection loaded
/// eagerly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonCard {
  pub person:        Person,
  pub primary_group: Option<Group>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn copy_relations_preserves_order() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let mut source = PeopleEmbed::new(Uuid::new_v4());
    source.people = vec![c, a, b];

    let mut copy = PeopleEmbed::new(Uuid::new_v4());
    copy.copy_relations(&source);
    assert_eq!(copy.people, vec![c, a, b]);

    // The copy is independent of later edits to the source.
    source.people.push(Uuid::new_v4());
    assert_eq!(copy.people.len(), 3);
  }

  #[test]
  fn style_identifiers_round_trip() {
    for style in [
      EmbedStyle::Standard,
      EmbedStyle::Feature,
      EmbedStyle::Custom("masonry".into()),
    ] {
      assert_eq!(EmbedStyle::parse(style.as_str()), style);
    }
  }

  #[test]
  fn new_embed_groups_by_group() {
    assert!(PeopleEmbed::new(Uuid::new_v4()).group_by_group);
  }
}
