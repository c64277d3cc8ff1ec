use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Copia local transitoria de un asset que no es direccionable en disco.
///
/// Cada staging crea su propio directorio temporal con nombre único
/// (resistente a colisiones entre runs concurrentes sobre el mismo
/// filesystem). El directorio se borra al soltar el guard, en cualquier
/// camino de salida del run (éxito, retorno temprano o error).
#[derive(Debug)]
pub struct StagedFile {
  dir: TempDir,
  path: PathBuf,
}

impl StagedFile {
  /// Vuelca `stream` completo a `<tmpdir>/<file_name>`.
  ///
  /// Se conserva el nombre base original: algunos extractores externos
  /// deciden por la extensión del archivo. Cualquier componente de ruta
  /// en `file_name` se descarta.
  pub fn from_stream(stream: &mut dyn Read, file_name: &str) -> Result<Self, StageError> {
    let dir = tempfile::Builder::new().prefix("midas-").tempdir()?;

    let base = Path::new(file_name).file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("upload"));
    let path = dir.path().join(base);

    let mut out = File::create(&path)?;
    io::copy(stream, &mut out)?;
    out.sync_all()?;

    Ok(Self { dir, path })
  }

  /// Ruta del archivo copiado, válida mientras viva el guard.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Directorio temporal que respalda la copia.
  pub fn dir(&self) -> &Path {
    self.dir.path()
  }
}
