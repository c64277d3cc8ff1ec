use std::path::Path;

use crate::domain::MetadataResult;

/// Port del lector de metadatos que consume el orquestador de imports.
///
/// Leer nunca falla: "sin metadatos" es un resultado válido con ambas
/// capas vacías, y los fallos por adapter quedan absorbidos aguas abajo.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
  async fn read(&self, path: &Path) -> MetadataResult;
}
