use crate::domain::{MetadataResult, SourceKeys, TagMap};

/// Resuelve el valor de un campo a partir de sus claves candidatas.
///
/// Dos pasadas separadas sobre la misma lista de candidatos:
///
/// 1. `try_exact`: lookup exacto candidato por candidato, primero en la
///    capa `mapped`, luego en `raw`.
/// 2. `try_loose` (solo con `loose_mapping` activo): substring
///    case-insensitive sobre las claves, en el mismo orden de candidatos.
///
/// La pasada exacta se completa para TODOS los candidatos antes de empezar
/// la loose: un match exacto de un candidato tardío gana sobre el loose
/// match de uno temprano. Dentro de cada pasada, el orden de candidatos
/// manda sobre el orden de iteración de claves.
///
/// Nunca devuelve un valor vacío: vacío/whitespace cuenta como "no hay".
pub fn resolve(sources: &SourceKeys, metadata: &MetadataResult, loose_mapping: bool) -> Option<String> {
  if let Some(value) = try_exact(sources, metadata) {
    return Some(value);
  }

  if loose_mapping {
    return try_loose(sources, metadata);
  }

  None
}

/// Pasada exacta: `mapped` antes que `raw` para cada candidato.
///
/// Las claves anidadas llegan aplanadas con `.` desde los adapters, así
/// que un candidato con dot-path (`format.tags.title`) es igualdad normal.
pub fn try_exact(sources: &SourceKeys, metadata: &MetadataResult) -> Option<String> {
  sources
    .iter()
    .find_map(|key| exact_in(metadata.mapped(), key).or_else(|| exact_in(metadata.raw(), key)))
}

/// Pasada loose: para cada candidato, recorre las claves de `mapped` en
/// orden de inserción y luego las de `raw`, buscando que la CLAVE contenga
/// al candidato (nunca al revés), sin distinguir mayúsculas.
pub fn try_loose(sources: &SourceKeys, metadata: &MetadataResult) -> Option<String> {
  sources
    .iter()
    .find_map(|needle| loose_in(metadata.mapped(), needle).or_else(|| loose_in(metadata.raw(), needle)))
}

fn exact_in(tags: &TagMap, key: &str) -> Option<String> {
  tags.get(key).map(str::trim).filter(|value| !value.is_empty()).map(String::from)
}

/// Case-fold Unicode completo, no solo ASCII: un candidato con acentos o
/// letras fuera de ASCII tiene que matchear igual.
fn loose_in(tags: &TagMap, needle: &str) -> Option<String> {
  let needle = needle.to_lowercase();

  tags
    .iter()
    .find(|(key, value)| key.to_lowercase().contains(&needle) && !value.trim().is_empty())
    .map(|(_, value)| value.trim().to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn metadata(mapped: &[(&str, &str)], raw: &[(&str, &str)]) -> MetadataResult {
    MetadataResult::new(
      mapped.iter().copied().collect::<TagMap>(),
      raw.iter().copied().collect::<TagMap>(),
    )
  }

  fn sources(keys: &[&str]) -> SourceKeys {
    SourceKeys::new(keys.iter().map(|k| k.to_string()).collect())
  }

  #[test]
  fn exact_mapped_beats_exact_raw() {
    let meta = metadata(&[("credit", "mapped")], &[("credit", "raw")]);
    assert_eq!(resolve(&sources(&["credit"]), &meta, false), Some("mapped".to_string()));
  }

  #[test]
  fn exact_raw_beats_loose_mapped() {
    let meta = metadata(&[("photo credit line", "loose")], &[("credit", "raw")]);
    assert_eq!(resolve(&sources(&["credit"]), &meta, true), Some("raw".to_string()));
  }

  #[test]
  fn loose_mapped_beats_loose_raw() {
    let meta = metadata(&[("XMP:CreditLine", "mapped")], &[("IPTC:Credit", "raw")]);
    assert_eq!(resolve(&sources(&["credit"]), &meta, true), Some("mapped".to_string()));
  }

  #[test]
  fn candidate_order_outranks_key_order() {
    // "b" aparece antes en el mapa, pero el candidato "a" va primero.
    let meta = metadata(&[("b", "second"), ("a", "first")], &[]);
    assert_eq!(resolve(&sources(&["a", "b"]), &meta, false), Some("first".to_string()));
  }

  #[test]
  fn exact_pass_completes_before_loose_begins() {
    // El primer candidato solo tiene loose match; el segundo tiene match
    // exacto. El exacto del candidato tardío debe ganar.
    let meta = metadata(&[("copyright notice", "loose-hit"), ("credit", "exact-hit")], &[]);
    assert_eq!(resolve(&sources(&["copyright", "credit"]), &meta, true), Some("exact-hit".to_string()));
  }

  #[test]
  fn loose_mapping_disabled_by_default_misses_partial_keys() {
    let meta = metadata(&[], &[("XMP-photoshop:Credit", "Jane")]);
    assert_eq!(resolve(&sources(&["credit"]), &meta, false), None);
  }

  #[test]
  fn loose_mapping_enabled_finds_partial_keys() {
    let meta = metadata(&[], &[("XMP-photoshop:Credit", "Jane")]);
    assert_eq!(resolve(&sources(&["credit"]), &meta, true), Some("Jane".to_string()));
  }

  #[test]
  fn loose_match_is_key_contains_candidate_not_reverse() {
    // El candidato contiene a la clave, no al revés: no debe matchear.
    let meta = metadata(&[("credit", "value")], &[]);
    assert_eq!(try_loose(&sources(&["photo-credit-line"]), &meta), None);
  }

  #[test]
  fn loose_match_folds_non_ascii_case() {
    let meta = metadata(&[("Künstler-Name", "Anna")], &[]);
    assert_eq!(try_loose(&sources(&["KÜNSTLER"]), &meta), Some("Anna".to_string()));
  }

  #[test]
  fn dotted_candidates_address_flattened_keys() {
    let meta = metadata(&[], &[("format.tags.title", "Clip")]);
    assert_eq!(resolve(&sources(&["format.tags.title"]), &meta, false), Some("Clip".to_string()));
  }

  #[test]
  fn empty_and_whitespace_values_do_not_resolve() {
    let meta = metadata(&[("title", "   ")], &[("title", "")]);
    assert_eq!(resolve(&sources(&["title"]), &meta, true), None);
  }

  #[test]
  fn resolved_values_are_trimmed() {
    let meta = metadata(&[("title", "  Sunset  ")], &[]);
    assert_eq!(resolve(&sources(&["title"]), &meta, false), Some("Sunset".to_string()));
  }

  #[test]
  fn no_candidates_resolve_to_nothing() {
    let meta = metadata(&[("title", "Sunset")], &[]);
    assert_eq!(resolve(&SourceKeys::parse(""), &meta, true), None);
  }
}
