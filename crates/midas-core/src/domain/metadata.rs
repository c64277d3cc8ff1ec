/// Mapa clave → valor que conserva el orden de inserción.
///
/// El orden importa: el loose matching recorre las claves en el orden en
/// que el adapter las produjo, y la primera coincidencia gana. Por eso el
/// respaldo es un `Vec` y no un `HashMap`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMap(Vec<(String, String)>);

impl TagMap {
  pub fn new() -> Self {
    TagMap(Vec::new())
  }

  /// Inserta el par, reemplazando el valor si la clave ya existe.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
    let key = key.into();
    let value = value.into();

    match self.0.iter_mut().find(|(k, _)| *k == key) {
      Some((_, v)) => *v = value,
      None => self.0.push((key, value)),
    }
  }

  /// Lookup exacto por clave.
  ///
  /// Los adapters aplanan salida jerárquica uniendo segmentos con `.`
  /// (p. ej. `format.tags.title`), así que el direccionamiento por
  /// dot-path es igualdad de clave normal.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  /// Itera los pares en orden de inserción.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagMap {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = TagMap::new();
    for (k, v) in iter {
      map.insert(k, v);
    }
    map
  }
}

/// Resultado de extraer metadatos de un archivo: dos capas de tags.
///
/// Ambas capas vacías significan "no se encontraron metadatos", un estado
/// terminal válido, no un error. Inmutable una vez que el reader lo
/// devuelve; no expone API de mutación.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataResult {
  /// Claves "amigables" ya mapeadas (`title`, `copyright`, …).
  mapped: TagMap,
  /// Claves crudas del vendor (`EXIF:Make`, `XMP-photoshop:Credit`, …).
  raw: TagMap,
}

impl MetadataResult {
  pub fn new(mapped: TagMap, raw: TagMap) -> Self {
    Self { mapped, raw }
  }

  pub fn empty() -> Self {
    Self::default()
  }

  pub fn mapped(&self) -> &TagMap {
    &self.mapped
  }

  pub fn raw(&self) -> &TagMap {
    &self.raw
  }

  pub fn is_empty(&self) -> bool {
    self.mapped.is_empty() && self.raw.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_preserves_order_and_replaces_values() {
    let mut tags = TagMap::new();
    tags.insert("b", "1");
    tags.insert("a", "2");
    tags.insert("b", "3");

    let keys: Vec<&str> = tags.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(tags.get("b"), Some("3"));
    assert_eq!(tags.len(), 2);
  }

  #[test]
  fn empty_result_reports_empty() {
    assert!(MetadataResult::empty().is_empty());

    let raw: TagMap = [("EXIF:Make", "Canon")].into_iter().collect();
    assert!(!MetadataResult::new(TagMap::new(), raw).is_empty());
  }
}
