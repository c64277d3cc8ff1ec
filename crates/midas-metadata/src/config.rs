use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use midas_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use midas_core::domain::{AdapterEntry, AdapterKind, AdapterMapping, ExtensionPattern};

use crate::registry::ToolPaths;

/// Sección `[extraction]`: mapping de adapters y paths de binarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
  /// Path del binario exiftool. Vacío → se busca en PATH.
  #[serde(default)]
  pub exiftool_path: String,

  /// Path del binario ffprobe. Vacío → se busca en PATH.
  #[serde(default)]
  pub ffprobe_path: String,

  /// Path del binario identify (ImageMagick). Vacío → se busca en PATH.
  #[serde(default)]
  pub imagick_path: String,

  /// Entradas adapter → extensiones, en orden de prioridad. El orden del
  /// array ES el orden en que el reader intenta los adapters.
  #[serde(default = "default_adapters")]
  pub adapters: Vec<AdapterConfigEntry>,
}

/// Entrada cruda tal como viene del TOML.
///
/// El `kind` se valida recién en `adapter_mapping()`: un identificador
/// desconocido se omite con warning, nunca rompe la carga completa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfigEntry {
  pub kind: String,
  pub extensions: Vec<ExtensionPattern>,
}

fn default_adapters() -> Vec<AdapterConfigEntry> {
  vec![AdapterConfigEntry {
    kind: AdapterKind::Native.name().to_string(),
    extensions: ["jpg", "jpeg", "tif", "tiff"].iter().map(|e| ExtensionPattern::parse(e)).collect(),
  }]
}

impl Default for ExtractionConfig {
  fn default() -> Self {
    Self {
      exiftool_path: String::new(),
      ffprobe_path: String::new(),
      imagick_path: String::new(),
      adapters: default_adapters(),
    }
  }
}

impl ExtractionConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg: Self = CONFIG_BACKEND.load_section("extraction")?;
    CONFIG_BACKEND.save_section("extraction", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("extraction", self)
  }

  /// Mapping validado. Conserva el orden del archivo; descarta entradas
  /// con `kind` desconocido.
  pub fn adapter_mapping(&self) -> AdapterMapping {
    let entries = self
      .adapters
      .iter()
      .filter_map(|entry| match AdapterKind::parse(&entry.kind) {
        Some(kind) => Some(AdapterEntry::new(kind, entry.extensions.clone())),
        None => {
          warn!(kind = %entry.kind, "unknown adapter kind in configuration, skipping entry");
          None
        }
      })
      .collect();

    AdapterMapping::new(entries)
  }

  pub fn tool_paths(&self) -> ToolPaths {
    ToolPaths {
      exiftool: path_opt(&self.exiftool_path),
      ffprobe: path_opt(&self.ffprobe_path),
      imagick: path_opt(&self.imagick_path),
    }
  }
}

fn path_opt(raw: &str) -> Option<PathBuf> {
  let raw = raw.trim();
  if raw.is_empty() { None } else { Some(PathBuf::from(raw)) }
}
