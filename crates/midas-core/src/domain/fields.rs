use serde::{Deserialize, Deserializer, Serialize};

/// Lista ordenada de claves candidatas para resolver un campo.
///
/// En configuración se aceptan dos formas equivalentes:
/// - secuencia: `sources = ["credit", "XMP-photoshop:Credit"]`
/// - string separada por comas: `sources = "credit, XMP-photoshop:Credit"`
///
/// Ambas se normalizan a una secuencia al cargar; el resto del sistema
/// nunca ve la forma con comas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SourceKeys(Vec<String>);

impl SourceKeys {
  pub fn new(keys: Vec<String>) -> Self {
    SourceKeys(keys.into_iter().map(|k| k.trim().to_string()).filter(|k| !k.is_empty()).collect())
  }

  /// Parsea la forma con comas: split + trim, descartando entradas vacías.
  pub fn parse(spec: &str) -> Self {
    Self::new(spec.split(',').map(str::to_string).collect())
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl From<&str> for SourceKeys {
  fn from(spec: &str) -> Self {
    SourceKeys::parse(spec)
  }
}

impl From<Vec<String>> for SourceKeys {
  fn from(keys: Vec<String>) -> Self {
    SourceKeys::new(keys)
  }
}

impl<'de> Deserialize<'de> for SourceKeys {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Form {
      One(String),
      Many(Vec<String>),
    }

    match Form::deserialize(deserializer)? {
      Form::One(spec) => Ok(SourceKeys::parse(&spec)),
      Form::Many(keys) => Ok(SourceKeys::new(keys)),
    }
  }
}

/// Campo destino del blueprint y sus claves candidatas, en orden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
  /// Handle del campo en el blueprint del contenedor.
  pub target: String,
  /// Claves de metadatos a intentar, de mayor a menor prioridad.
  pub sources: SourceKeys,
}

impl FieldSpec {
  pub fn new(target: impl Into<String>, sources: impl Into<SourceKeys>) -> Self {
    Self { target: target.into(), sources: sources.into() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_splits_and_trims_comma_form() {
    let keys = SourceKeys::parse("credit, XMP-photoshop:Credit ,, ");
    let collected: Vec<&str> = keys.iter().collect();
    assert_eq!(collected, vec!["credit", "XMP-photoshop:Credit"]);
  }

  #[test]
  fn single_string_equals_one_element_sequence() {
    assert_eq!(SourceKeys::parse("title"), SourceKeys::new(vec!["title".to_string()]));
  }

  #[test]
  fn deserializes_both_forms() {
    #[derive(Deserialize)]
    struct Holder {
      sources: SourceKeys,
    }

    let comma: Holder = toml::from_str(r#"sources = "credit, XMP-photoshop:Credit""#).unwrap();
    let seq: Holder = toml::from_str(r#"sources = ["credit", "XMP-photoshop:Credit"]"#).unwrap();

    assert_eq!(comma.sources, seq.sources);
  }
}
