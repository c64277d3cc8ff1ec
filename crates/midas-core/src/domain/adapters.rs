use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Estrategias de extracción soportadas. Conjunto cerrado: cada variante
/// conoce su identificador de configuración y nada más; la construcción
/// concreta (paths de binarios incluidos) vive en el registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
  /// Parser EXIF in-process, sin binarios externos.
  Native,
  /// Binario externo `exiftool`.
  Exiftool,
  /// Binario externo `ffprobe`.
  Ffprobe,
  /// Binario externo `identify` (ImageMagick).
  Imagick,
}

impl AdapterKind {
  pub const ALL: &'static [AdapterKind] =
    &[AdapterKind::Native, AdapterKind::Exiftool, AdapterKind::Ffprobe, AdapterKind::Imagick];

  /// Identificador usado en configuración y logs.
  pub fn name(&self) -> &'static str {
    match self {
      AdapterKind::Native => "native",
      AdapterKind::Exiftool => "exiftool",
      AdapterKind::Ffprobe => "ffprobe",
      AdapterKind::Imagick => "imagick",
    }
  }

  /// Parseo case-insensitive del identificador.
  ///
  /// Identificadores desconocidos devuelven `None`: el contrato del
  /// registry es omitir la entrada en silencio, nunca fallar por ella.
  pub fn parse(s: &str) -> Option<Self> {
    let s = s.trim();
    AdapterKind::ALL.iter().copied().find(|kind| kind.name().eq_ignore_ascii_case(s))
  }
}

impl fmt::Display for AdapterKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Patrón de extensión: una extensión concreta (guardada en minúsculas) o
/// el comodín `*`, representado como centinela explícito en vez de
/// comparar el literal por todo el código.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPattern {
  Any,
  Ext(String),
}

impl ExtensionPattern {
  pub fn parse(s: &str) -> Self {
    let s = s.trim();
    if s == "*" { ExtensionPattern::Any } else { ExtensionPattern::Ext(s.to_lowercase()) }
  }

  /// Comparación case-insensitive: `PHOTO.JPG` matchea `["jpg"]`.
  pub fn matches(&self, extension: &str) -> bool {
    match self {
      ExtensionPattern::Any => true,
      ExtensionPattern::Ext(ext) => ext.eq_ignore_ascii_case(extension.trim()),
    }
  }

  pub fn is_any(&self) -> bool {
    matches!(self, ExtensionPattern::Any)
  }
}

impl Serialize for ExtensionPattern {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      ExtensionPattern::Any => serializer.serialize_str("*"),
      ExtensionPattern::Ext(ext) => serializer.serialize_str(ext),
    }
  }
}

impl<'de> Deserialize<'de> for ExtensionPattern {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(ExtensionPattern::parse(&raw))
  }
}

/// Una entrada del mapping: estrategia + extensiones que cubre.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterEntry {
  pub kind: AdapterKind,
  pub extensions: Vec<ExtensionPattern>,
}

impl AdapterEntry {
  pub fn new(kind: AdapterKind, extensions: Vec<ExtensionPattern>) -> Self {
    Self { kind, extensions }
  }

  pub fn covers(&self, extension: &str) -> bool {
    self.extensions.iter().any(|pattern| pattern.matches(extension))
  }
}

/// Mapping ordenado estrategia → extensiones.
///
/// Invariante: el orden de inserción ES la prioridad de intento. Por eso
/// es un `Vec` de entradas y no un mapa: la configuración lo declara como
/// array de tablas y el orden se conserva de punta a punta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdapterMapping {
  entries: Vec<AdapterEntry>,
}

impl AdapterMapping {
  pub fn new(entries: Vec<AdapterEntry>) -> Self {
    Self { entries }
  }

  pub fn entries(&self) -> &[AdapterEntry] {
    &self.entries
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Estrategias aplicables a `extension`, en orden de configuración.
  ///
  /// La extensión llega tal cual (p. ej. `"JPG"`); la comparación es
  /// case-insensitive. Sin coincidencias → lista vacía: "tipo de archivo
  /// no soportado" es un resultado válido, no un error.
  pub fn kinds_for(&self, extension: &str) -> Vec<AdapterKind> {
    let ext = extension.trim().to_lowercase();
    self.entries.iter().filter(|entry| entry.covers(&ext)).map(|entry| entry.kind).collect()
  }
}
