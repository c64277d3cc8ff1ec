use midas_core::domain::TagMap;

/// Aliases normalizados en minúsculas, sin prefijo de grupo. Cubren las
/// variantes EXIF/IPTC/XMP y los tags de contenedor que emite ffprobe.
pub const KEYS_TITLE: &[&str] = &["title", "xptitle", "objectname", "headline"];
pub const KEYS_DESCRIPTION: &[&str] = &["imagedescription", "description", "caption-abstract", "comment"];
pub const KEYS_COPYRIGHT: &[&str] = &["copyright", "rights", "copyrightnotice"];
pub const KEYS_CREDIT: &[&str] = &["credit", "creditline"];
pub const KEYS_AUTHOR: &[&str] = &["artist", "creator", "author", "by-line"];
pub const KEYS_KEYWORDS: &[&str] = &["keywords", "subject"];
pub const KEYS_MAKE: &[&str] = &["make"];
pub const KEYS_MODEL: &[&str] = &["model"];
pub const KEYS_SOFTWARE: &[&str] = &["software", "creatortool", "encoder"];
pub const KEYS_ORIENTATION: &[&str] = &["orientation"];
pub const KEYS_CREATED_AT: &[&str] = &["datetimeoriginal", "createdate", "creation_time", "datetimedigitized"];
pub const KEYS_WIDTH: &[&str] = &["imagewidth", "exifimagewidth", "pixelxdimension", "width"];
pub const KEYS_HEIGHT: &[&str] = &["imageheight", "exifimageheight", "pixelydimension", "height"];

/// (clave amigable, aliases), en el orden en que se emite la capa mapped.
pub const FRIENDLY_KEYS: &[(&str, &[&str])] = &[
  ("title", KEYS_TITLE),
  ("description", KEYS_DESCRIPTION),
  ("copyright", KEYS_COPYRIGHT),
  ("credit", KEYS_CREDIT),
  ("author", KEYS_AUTHOR),
  ("keywords", KEYS_KEYWORDS),
  ("make", KEYS_MAKE),
  ("model", KEYS_MODEL),
  ("software", KEYS_SOFTWARE),
  ("orientation", KEYS_ORIENTATION),
  ("created_at", KEYS_CREATED_AT),
  ("width", KEYS_WIDTH),
  ("height", KEYS_HEIGHT),
];

/// Construye la capa mapped (claves amigables) a partir de los tags
/// crudos del adapter. Los tags fuera de la tabla no se pierden: siguen
/// disponibles en la capa raw.
pub fn map_friendly(raw: &TagMap) -> TagMap {
  let mut mapped = TagMap::new();

  for (friendly, aliases) in FRIENDLY_KEYS {
    if let Some(value) = find_tag_value(raw, aliases) {
      mapped.insert(*friendly, value);
    }
  }

  mapped
}

/// Busca el primer valor no vacío cuyo sufijo de clave matchea uno de los
/// alias, respetando el orden de la lista de alias.
pub fn find_tag_value(raw: &TagMap, aliases: &[&str]) -> Option<String> {
  for alias in aliases {
    let hit = raw.iter().find(|(key, value)| tag_suffix(key) == *alias && !value.trim().is_empty());

    if let Some((_, value)) = hit {
      return Some(value.trim().to_string());
    }
  }

  None
}

/// Sufijo del tag sin prefijo de grupo: `EXIF:Make` → `make`,
/// `format.tags.title` → `title`, `exif:XPTitle` → `xptitle`.
fn tag_suffix(key: &str) -> String {
  key.rsplit([':', '.']).next().unwrap_or(key).to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(pairs: &[(&str, &str)]) -> TagMap {
    pairs.iter().copied().collect()
  }

  #[test]
  fn suffix_strips_group_prefixes() {
    assert_eq!(tag_suffix("EXIF:Make"), "make");
    assert_eq!(tag_suffix("format.tags.title"), "title");
    assert_eq!(tag_suffix("Model"), "model");
  }

  #[test]
  fn alias_order_wins_over_key_order() {
    // "description" está antes en el mapa, pero "imagedescription" es el
    // primer alias de la lista.
    let tags = raw(&[("PNG:Description", "segundo"), ("EXIF:ImageDescription", "primero")]);
    assert_eq!(find_tag_value(&tags, KEYS_DESCRIPTION), Some("primero".to_string()));
  }

  #[test]
  fn empty_values_are_skipped() {
    let tags = raw(&[("EXIF:Make", "  "), ("IFD0:Make", "Canon")]);
    assert_eq!(find_tag_value(&tags, KEYS_MAKE), Some("Canon".to_string()));
  }

  #[test]
  fn friendly_layer_collects_known_tags() {
    let tags = raw(&[
      ("EXIF:XPTitle", "Sunset"),
      ("IPTC:Credit", "Jane Doe"),
      ("format.tags.creation_time", "2024-05-01T10:00:00Z"),
      ("MakerNotes:WeirdVendorTag", "ignored"),
    ]);

    let mapped = map_friendly(&tags);
    assert_eq!(mapped.get("title"), Some("Sunset"));
    assert_eq!(mapped.get("credit"), Some("Jane Doe"));
    assert_eq!(mapped.get("created_at"), Some("2024-05-01T10:00:00Z"));
    assert_eq!(mapped.get("weirdvendortag"), None);
  }
}
