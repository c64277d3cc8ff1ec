use std::path::PathBuf;

use midas_core::domain::{AdapterKind, AdapterMapping};
use midas_core::ports::TagExtractor;

use crate::exiftool::ExiftoolExtractor;
use crate::ffprobe::FfprobeExtractor;
use crate::imagick::ImagickExtractor;
use crate::native::NativeExtractor;

/// Paths de binarios externos. `None` o vacío → se resuelven por PATH al
/// momento de invocar.
#[derive(Debug, Clone, Default)]
pub struct ToolPaths {
  pub exiftool: Option<PathBuf>,
  pub ffprobe: Option<PathBuf>,
  pub imagick: Option<PathBuf>,
}

/// Resuelve estrategias concretas para una extensión.
///
/// La selección (orden, comodín, case) vive en `AdapterMapping`; aquí solo
/// se instancian los adapters con sus binarios configurados. Instanciar es
/// libre de efectos: un binario ausente falla al leer, no al construir.
pub struct AdapterRegistry {
  mapping: AdapterMapping,
  tools: ToolPaths,
}

impl AdapterRegistry {
  pub fn new(mapping: AdapterMapping, tools: ToolPaths) -> Self {
    Self { mapping, tools }
  }

  /// Adapters aplicables a la extensión, en orden de prioridad.
  ///
  /// Lista vacía = "tipo de archivo no soportado", un resultado válido.
  pub fn adapters_for(&self, extension: &str) -> Vec<Box<dyn TagExtractor>> {
    self.mapping.kinds_for(extension).into_iter().map(|kind| self.instantiate(kind)).collect()
  }

  fn instantiate(&self, kind: AdapterKind) -> Box<dyn TagExtractor> {
    match kind {
      AdapterKind::Native => Box::new(NativeExtractor::new()),
      AdapterKind::Exiftool => Box::new(ExiftoolExtractor::new(self.tools.exiftool.clone())),
      AdapterKind::Ffprobe => Box::new(FfprobeExtractor::new(self.tools.ffprobe.clone())),
      AdapterKind::Imagick => Box::new(ImagickExtractor::new(self.tools.imagick.clone())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use midas_core::domain::{AdapterEntry, ExtensionPattern};

  fn entry(kind: AdapterKind, exts: &[&str]) -> AdapterEntry {
    AdapterEntry::new(kind, exts.iter().map(|e| ExtensionPattern::parse(e)).collect())
  }

  #[test]
  fn instantiates_in_mapping_order() {
    let mapping = AdapterMapping::new(vec![
      entry(AdapterKind::Native, &["jpg", "jpeg"]),
      entry(AdapterKind::Exiftool, &["jpg", "png"]),
    ]);
    let registry = AdapterRegistry::new(mapping, ToolPaths::default());

    let names: Vec<&str> = registry.adapters_for("jpg").iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["native", "exiftool"]);
  }

  #[test]
  fn wildcard_entries_match_any_extension_any_case() {
    let mapping = AdapterMapping::new(vec![
      entry(AdapterKind::Exiftool, &["*"]),
      entry(AdapterKind::Ffprobe, &["mp4"]),
    ]);
    let registry = AdapterRegistry::new(mapping, ToolPaths::default());

    let names: Vec<&str> = registry.adapters_for("WebP").iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["exiftool"]);

    let names: Vec<&str> = registry.adapters_for("MP4").iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["exiftool", "ffprobe"]);
  }

  #[test]
  fn unmatched_extension_is_unsupported_not_an_error() {
    let mapping = AdapterMapping::new(vec![entry(AdapterKind::Native, &["jpg"])]);
    let registry = AdapterRegistry::new(mapping, ToolPaths::default());

    assert!(registry.adapters_for("pdf").is_empty());
  }
}
