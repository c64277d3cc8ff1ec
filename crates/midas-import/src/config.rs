use serde::{Deserialize, Serialize};

use midas_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use midas_core::domain::{ExtensionPattern, FieldSpec};

/// Sección `[importer]`: qué campos se importan y para qué archivos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
  /// Logging detallado del pipeline (nivel debug en el subscriber).
  #[serde(default)]
  pub debug: bool,

  /// Fallback por substring cuando el lookup exacto no encuentra nada.
  /// Apagado por defecto: puede producir matches sorprendentes.
  #[serde(default)]
  pub loose_mapping: bool,

  /// Re-importar (y pisar) metadatos cuando se re-sube un archivo.
  #[serde(default = "default_overwrite")]
  pub overwrite_on_reupload: bool,

  /// Nombre de la cola donde se encolan los trabajos de import.
  #[serde(default = "default_queue")]
  pub queue: String,

  /// Allow-list de extensiones. `"*"` admite cualquier archivo.
  #[serde(default = "default_extensions")]
  pub extensions: Vec<ExtensionPattern>,

  /// Campos a importar, en orden. Cada entrada: handle del blueprint +
  /// claves de metadatos candidatas.
  #[serde(default)]
  pub fields: Vec<FieldSpec>,
}

fn default_overwrite() -> bool {
  true
}

fn default_queue() -> String {
  "default".to_string()
}

fn default_extensions() -> Vec<ExtensionPattern> {
  ["jpg", "jpeg", "tif", "tiff"].iter().map(|e| ExtensionPattern::parse(e)).collect()
}

impl Default for ImportConfig {
  fn default() -> Self {
    Self {
      debug: false,
      loose_mapping: false,
      overwrite_on_reupload: default_overwrite(),
      queue: default_queue(),
      extensions: default_extensions(),
      fields: Vec::new(),
    }
  }
}

impl ImportConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg: Self = CONFIG_BACKEND.load_section("importer")?;
    CONFIG_BACKEND.save_section("importer", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("importer", self)
  }

  /// ¿Pasa la extensión el allow-list? El comodín admite todo; el resto
  /// es pertenencia exacta case-insensitive.
  pub fn allows_extension(&self, extension: &str) -> bool {
    self.extensions.iter().any(|pattern| pattern.matches(extension))
  }
}
