use std::path::Path;

use crate::domain::MetadataResult;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
  #[error("tool unavailable: {0}")]
  Unavailable(String),

  #[error("io error: {0}")]
  Io(String),

  #[error("corrupt metadata: {0}")]
  Corrupt(String),

  #[error("internal error: {0}")]
  Internal(String),
}

/// Port que abstrae una estrategia de extracción de tags.
///
/// Implementaciones posibles:
/// - parser EXIF in-process
/// - wrappers de binarios externos (exiftool, ffprobe, identify)
///
/// El reader las trata como cajas negras: devuelven un resultado de dos
/// capas o fallan, y un fallo nunca aborta la cadena completa.
#[async_trait::async_trait]
pub trait TagExtractor: Send + Sync {
  /// Nombre corto para logs.
  fn name(&self) -> &'static str;

  async fn extract(&self, path: &Path) -> Result<MetadataResult, ExtractError>;
}
