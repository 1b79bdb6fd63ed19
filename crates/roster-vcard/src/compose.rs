//! vCard 3.0 serialization.
//!
//! Produces CRLF line endings and folds at 75 octets per RFC 2426 §2.6.
//! Field order is fixed; absent optional fields are omitted entirely.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use roster_core::{
  group::Group,
  locale::Locales,
  person::{ImageRef, Person},
  slug::slugify,
};

// ─── RFC 2426 line folding ────────────────────────────────────────────────────

/// Emit `s` as one logical line, folding at 75 octets with CRLF + SP
/// continuation.
fn fold_line(s: &str) -> String {
  if s.len() <= 75 {
    return format!("{}\r\n", s);
  }

  let mut result = String::new();
  let total = s.len();
  let mut pos = 0usize;
  let mut first = true;

  while pos < total {
    let limit = if first { 75 } else { 74 };
    let end   = if pos + limit >= total {
      total
    } else {
      // Walk back to the nearest valid UTF-8 char boundary
      let mut e = pos + limit;
      while e > pos && !s.is_char_boundary(e) {
        e -= 1;
      }
      // Guarantee at least one byte per segment
      if e == pos { pos + 1 } else { e }
    };

    if !first {
      result.push(' ');
    }
    result.push_str(&s[pos..end]);
    result.push_str("\r\n");
    pos   = end;
    first = false;
  }

  result
}

// ─── Value escaping ───────────────────────────────────────────────────────────

/// Escape a full property value: `\`, `,`, `;`, `\n`.
fn escape_value(s: &str) -> String {
  s.replace('\\', "\\\\")
   .replace(',', "\\,")
   .replace(';', "\\;")
   .replace('\n', "\\n")
}

/// Escape a semicolon-delimited component (N / ADR field): `\`, `;`, `\n`.
/// Commas are list-separators within a component and are not escaped here.
fn escape_component(s: &str) -> String {
  s.replace('\\', "\\\\")
   .replace(';', "\\;")
   .replace('\n', "\\n")
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// Rendering context for [`compose`].
pub struct ComposeOptions<'a> {
  /// Language used to resolve translated fields.
  pub language: &'a str,
  pub locales:  &'a Locales,
  /// Absolute site root for the photo URL fallback. `None` disables the
  /// fallback: an unreadable photo is omitted.
  pub base_url: Option<&'a str>,
}

// ─── Photo ───────────────────────────────────────────────────────────────────

enum Photo {
  Inline { b64: String, type_param: String },
  Uri { url: String, type_param: String },
}

/// Try to inline the stored bytes; degrade to the public URL when the read
/// fails and a site root is available.
fn photo_field(visual: &ImageRef, base_url: Option<&str>) -> Option<Photo> {
  let type_param = visual.extension.to_uppercase();
  match std::fs::read(&visual.path) {
    Ok(bytes) => Some(Photo::Inline { b64: B64.encode(bytes), type_param }),
    Err(_) => base_url.map(|base| Photo::Uri {
      url: absolute_url(base, &visual.url),
      type_param,
    }),
  }
}

fn absolute_url(base: &str, url: &str) -> String {
  if url.starts_with("http://") || url.starts_with("https://") {
    url.to_owned()
  } else {
    format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
  }
}

fn present(field: &Option<String>) -> Option<&str> {
  field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ─── Composer ────────────────────────────────────────────────────────────────

/// Serialize `person` as a vCard 3.0 byte payload.
///
/// `primary_group` should be the first entry of the person's ordered group
/// list; its fields are appended after the person's own, each independently
/// conditional on presence.
pub fn compose(
  person: &Person,
  primary_group: Option<&Group>,
  opts: &ComposeOptions<'_>,
) -> Vec<u8> {
  let mut lines: Vec<String> = Vec::new();
  lines.push("BEGIN:VCARD\r\n".to_owned());
  lines.push("VERSION:3.0\r\n".to_owned());

  let name = person.display_name(opts.language, opts.locales);
  lines.push(fold_line(&format!("N:;{};;;", escape_component(&name))));
  lines.push(fold_line(&format!("FN:{}", escape_value(&name))));

  if let Some(visual) = &person.visual {
    match photo_field(visual, opts.base_url) {
      Some(Photo::Inline { b64, type_param }) => {
        lines.push(fold_line(&format!("PHOTO;ENCODING=B;TYPE={type_param}:{b64}")));
      }
      Some(Photo::Uri { url, type_param }) => {
        lines.push(fold_line(&format!("PHOTO;VALUE=URI;TYPE={type_param}:{url}")));
      }
      None => {}
    }
  }

  if let Some(email) = present(&person.email) {
    lines.push(fold_line(&format!("EMAIL:{}", escape_value(email))));
  }
  if let Some(function) = person.function(opts.language, opts.locales) {
    lines.push(fold_line(&format!("TITLE:{}", escape_value(function))));
  }
  if let Some(phone) = present(&person.phone) {
    lines.push(fold_line(&format!("TEL;TYPE=WORK:{}", escape_value(phone))));
  }
  if let Some(mobile) = present(&person.mobile) {
    lines.push(fold_line(&format!("TEL;TYPE=CELL:{}", escape_value(mobile))));
  }
  if let Some(fax) = present(&person.fax) {
    lines.push(fold_line(&format!("TEL;TYPE=FAX:{}", escape_value(fax))));
  }
  if let Some(website) = present(&person.website) {
    lines.push(fold_line(&format!("URL:{}", escape_value(website))));
  }

  if let Some(group) = primary_group {
    let group_name = group.display_name(opts.language, opts.locales);
    lines.push(fold_line(&format!("ORG:{}", escape_value(&group_name))));

    let street = present(&group.address);
    let city   = present(&group.city);
    let postal = present(&group.postal_code);
    if street.is_some() || city.is_some() || postal.is_some() {
      // ADR components: po-box;extended;street;locality;region;code;country
      lines.push(fold_line(&format!(
        "ADR;TYPE=WORK:;;{};{};;{};",
        street.map(escape_component).unwrap_or_default(),
        city.map(escape_component).unwrap_or_default(),
        postal.map(escape_component).unwrap_or_default(),
      )));
    }
    if let Some(phone) = present(&group.phone) {
      lines.push(fold_line(&format!("TEL;TYPE=WORK:{}", escape_value(phone))));
    }
    if let Some(fax) = present(&group.fax) {
      lines.push(fold_line(&format!("TEL;TYPE=FAX:{}", escape_value(fax))));
    }
    if let Some(website) = present(&group.website) {
      lines.push(fold_line(&format!("URL:{}", escape_value(website))));
    }
  }

  lines.push("END:VCARD\r\n".to_owned());
  lines.concat().into_bytes()
}

/// Attachment filename for a vCard download, derived from the display name.
pub fn download_filename(person: &Person, language: &str, locales: &Locales) -> String {
  let base = slugify(&person.display_name(language, locales));
  if base.is_empty() {
    "contact.vcf".to_owned()
  } else {
    format!("{base}.vcf")
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use roster_core::{
    group::{GroupTranslation, NewGroup},
    locale::TranslationSet,
    person::{NewPerson, PersonTranslation},
  };
  use uuid::Uuid;

  use super::*;

  fn locales() -> Locales {
    Locales::new(["en", "de"]).with_fallbacks("de", ["en"])
  }

  fn opts(locales: &Locales) -> ComposeOptions<'_> {
    ComposeOptions { language: "en", locales, base_url: None }
  }

  fn named_person(name: &str) -> Person {
    NewPerson {
      translations: TranslationSet::new().with("en", PersonTranslation {
        name: name.to_owned(),
        ..PersonTranslation::default()
      }),
      ..NewPerson::default()
    }
    .into_person(Uuid::new_v4(), Utc::now())
  }

  fn compose_str(person: &Person, group: Option<&Group>, opts: &ComposeOptions<'_>) -> String {
    String::from_utf8(compose(person, group, opts)).unwrap()
  }

  // ── Envelope ────────────────────────────────────────────────────────────────

  #[test]
  fn envelope_contains_required_lines() {
    let l = locales();
    let out = compose_str(&named_person("Jane Doe"), None, &opts(&l));
    assert!(out.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"), "got:\n{out}");
    assert!(out.ends_with("END:VCARD\r\n"), "got:\n{out}");
    assert!(out.contains("FN:Jane Doe\r\n"));
    assert!(out.contains("N:;Jane Doe;;;\r\n"));
  }

  // ── Field omission ──────────────────────────────────────────────────────────

  #[test]
  fn sparse_person_emits_no_empty_fields() {
    let l = locales();
    let mut person = named_person("Jane Doe");
    person.email = Some("jane@example.com".to_owned());
    let out = compose_str(&person, None, &opts(&l));

    assert!(out.contains("EMAIL:jane@example.com\r\n"));
    assert!(!out.contains("TEL"), "unexpected TEL in:\n{out}");
    assert!(!out.contains("URL"), "unexpected URL in:\n{out}");
    assert!(!out.contains("PHOTO"), "unexpected PHOTO in:\n{out}");
    assert!(!out.contains("TITLE"), "unexpected TITLE in:\n{out}");
    assert!(!out.contains("ORG"), "unexpected ORG in:\n{out}");
  }

  #[test]
  fn blank_strings_count_as_absent() {
    let l = locales();
    let mut person = named_person("Jane Doe");
    person.phone = Some("   ".to_owned());
    person.email = Some(String::new());
    let out = compose_str(&person, None, &opts(&l));
    assert!(!out.contains("TEL"), "got:\n{out}");
    assert!(!out.contains("EMAIL"), "got:\n{out}");
  }

  // ── Phones and title ────────────────────────────────────────────────────────

  #[test]
  fn phone_kinds_map_to_type_params() {
    let l = locales();
    let mut person = named_person("Jane Doe");
    person.phone  = Some("+1 555 0100".to_owned());
    person.mobile = Some("+1 555 0101".to_owned());
    person.fax    = Some("+1 555 0102".to_owned());
    person.website = Some("https://jane.example".to_owned());
    let out = compose_str(&person, None, &opts(&l));

    assert!(out.contains("TEL;TYPE=WORK:+1 555 0100\r\n"), "got:\n{out}");
    assert!(out.contains("TEL;TYPE=CELL:+1 555 0101\r\n"));
    assert!(out.contains("TEL;TYPE=FAX:+1 555 0102\r\n"));
    assert!(out.contains("URL:https://jane.example\r\n"));
  }

  #[test]
  fn title_comes_from_resolved_function() {
    let l = locales();
    let mut person = named_person("Jane Doe");
    person
      .translations
      .get_mut("en")
      .unwrap()
      .function = "Head of Engineering".to_owned();
    let out = compose_str(&person, None, &opts(&l));
    assert!(out.contains("TITLE:Head of Engineering\r\n"), "got:\n{out}");
  }

  // ── Untranslated name ───────────────────────────────────────────────────────

  #[test]
  fn untranslated_person_gets_placeholder_name() {
    let l = locales();
    let person = NewPerson::default().into_person(Uuid::new_v4(), Utc::now());
    let out = compose_str(&person, None, &opts(&l));
    assert!(out.contains(&format!("FN:Person: {}\r\n", person.person_id)), "got:\n{out}");
  }

  // ── Primary group ───────────────────────────────────────────────────────────

  fn group(name: &str) -> Group {
    NewGroup {
      translations: TranslationSet::new().with("en", GroupTranslation {
        name: name.to_owned(),
        ..GroupTranslation::default()
      }),
      ..NewGroup::default()
    }
    .into_group(Uuid::new_v4(), Utc::now())
  }

  #[test]
  fn group_fields_follow_person_fields() {
    let l = locales();
    let mut g = group("Acme Corp");
    g.address = Some("1 Main St".to_owned());
    g.city = Some("Springfield".to_owned());
    g.postal_code = Some("62701".to_owned());
    g.phone = Some("+1 555 0200".to_owned());
    g.website = Some("https://acme.example".to_owned());

    let out = compose_str(&named_person("Jane Doe"), Some(&g), &opts(&l));
    assert!(out.contains("ORG:Acme Corp\r\n"), "got:\n{out}");
    assert!(out.contains("ADR;TYPE=WORK:;;1 Main St;Springfield;;62701;\r\n"));
    assert!(out.contains("TEL;TYPE=WORK:+1 555 0200\r\n"));
    assert!(out.contains("URL:https://acme.example\r\n"));
  }

  #[test]
  fn partial_address_is_still_emitted() {
    let l = locales();
    let mut g = group("Acme Corp");
    g.city = Some("Springfield".to_owned());
    let out = compose_str(&named_person("Jane Doe"), Some(&g), &opts(&l));
    assert!(out.contains("ADR;TYPE=WORK:;;;Springfield;;;\r\n"), "got:\n{out}");
  }

  #[test]
  fn empty_address_fields_suppress_adr() {
    let l = locales();
    let g = group("Acme Corp");
    let out = compose_str(&named_person("Jane Doe"), Some(&g), &opts(&l));
    assert!(out.contains("ORG:Acme Corp\r\n"));
    assert!(!out.contains("ADR"), "got:\n{out}");
  }

  #[test]
  fn untranslated_group_still_yields_org() {
    let l = locales();
    let g = NewGroup::default().into_group(Uuid::new_v4(), Utc::now());
    let out = compose_str(&named_person("Jane Doe"), Some(&g), &opts(&l));
    assert!(out.contains(&format!("ORG:Group: {}\r\n", g.group_id)), "got:\n{out}");
  }

  // ── Photo ───────────────────────────────────────────────────────────────────

  fn visual(path: &str) -> ImageRef {
    ImageRef {
      path:      path.to_owned(),
      url:       "/media/portraits/jane.png".to_owned(),
      extension: "png".to_owned(),
    }
  }

  #[test]
  fn readable_photo_is_inlined_base64() {
    let path = std::env::temp_dir().join(format!("roster-vcard-{}.png", Uuid::new_v4()));
    std::fs::write(&path, b"not really a png").unwrap();

    let l = locales();
    let mut person = named_person("Jane Doe");
    person.visual = Some(visual(path.to_str().unwrap()));
    let out = compose_str(&person, None, &opts(&l));
    std::fs::remove_file(&path).ok();

    let expected = B64.encode(b"not really a png");
    assert!(out.contains(&format!("PHOTO;ENCODING=B;TYPE=PNG:{expected}\r\n")), "got:\n{out}");
  }

  #[test]
  fn missing_photo_falls_back_to_url() {
    let l = locales();
    let mut person = named_person("Jane Doe");
    person.visual = Some(visual("/nonexistent/jane.png"));
    let o = ComposeOptions {
      language: "en",
      locales:  &l,
      base_url: Some("https://people.example/"),
    };
    let out = compose_str(&person, None, &o);
    assert!(
      out.contains("PHOTO;VALUE=URI;TYPE=PNG:https://people.example/media/portraits/jane.png\r\n"),
      "got:\n{out}"
    );
  }

  #[test]
  fn missing_photo_without_base_url_is_omitted() {
    let l = locales();
    let mut person = named_person("Jane Doe");
    person.visual = Some(visual("/nonexistent/jane.png"));
    let out = compose_str(&person, None, &opts(&l));
    assert!(!out.contains("PHOTO"), "got:\n{out}");
  }

  // ── Folding and escaping ────────────────────────────────────────────────────

  #[test]
  fn long_lines_are_folded_at_75_octets() {
    let path = std::env::temp_dir().join(format!("roster-vcard-{}.jpg", Uuid::new_v4()));
    std::fs::write(&path, vec![0xAB; 600]).unwrap();

    let l = locales();
    let mut person = named_person("Jane Doe");
    person.visual = Some(ImageRef {
      path:      path.to_str().unwrap().to_owned(),
      url:       "/media/x.jpg".to_owned(),
      extension: "jpg".to_owned(),
    });
    let out = compose_str(&person, None, &opts(&l));
    std::fs::remove_file(&path).ok();

    for physical_line in out.split("\r\n").filter(|line| !line.is_empty()) {
      assert!(
        physical_line.len() <= 75,
        "physical line too long ({} bytes): {:?}",
        physical_line.len(),
        physical_line
      );
    }
  }

  #[test]
  fn commas_and_semicolons_are_escaped() {
    let l = locales();
    let person = named_person("Doe; Jane, PhD");
    let out = compose_str(&person, None, &opts(&l));
    assert!(out.contains("FN:Doe\\; Jane\\, PhD\r\n"), "got:\n{out}");
    assert!(out.contains("N:;Doe\\; Jane, PhD;;;\r\n"), "got:\n{out}");
  }

  #[test]
  fn multiline_address_is_escaped() {
    let l = locales();
    let mut g = group("Acme Corp");
    g.address = Some("1 Main St\nBuilding 4".to_owned());
    let out = compose_str(&named_person("Jane Doe"), Some(&g), &opts(&l));
    assert!(out.contains("ADR;TYPE=WORK:;;1 Main St\\nBuilding 4;;;;\r\n"), "got:\n{out}");
  }

  // ── Filename ────────────────────────────────────────────────────────────────

  #[test]
  fn filename_derives_from_display_name() {
    let l = locales();
    assert_eq!(download_filename(&named_person("Jane Doe"), "en", &l), "jane-doe.vcf");
  }

  #[test]
  fn filename_for_untranslated_person_uses_placeholder() {
    let l = locales();
    let person = NewPerson::default().into_person(Uuid::new_v4(), Utc::now());
    let filename = download_filename(&person, "en", &l);
    assert!(filename.starts_with("person-"), "got: {filename}");
    assert!(filename.ends_with(".vcf"));
  }
}
