use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::AssetId;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
  #[error("stream error: {0}")]
  Stream(String),

  #[error("store error: {0}")]
  Store(String),
}

/// Contrato mínimo que el importer necesita del asset del CMS anfitrión.
///
/// No modela el asset completo: solo "¿declara el blueprint el campo X?",
/// "asigna X = valor" y el acceso a los bytes del archivo. El resto del
/// modelo de assets queda del lado del anfitrión.
pub trait MediaAsset: Send {
  /// Identificador opaco, solo para correlación en logs.
  fn id(&self) -> AssetId;

  /// Ruta relativa al storage del contenedor. Siempre presente.
  fn path(&self) -> &str;

  /// Ruta local resuelta, si el disco es local. Puede apuntar a un
  /// archivo que ya no existe; el caller debe verificarlo.
  fn resolved_path(&self) -> Option<PathBuf>;

  /// Abre el stream de bytes del archivo (discos remotos incluidos).
  fn open_stream(&self) -> Result<Box<dyn Read + Send>, AssetError>;

  /// ¿Declara el blueprint del contenedor este campo?
  fn has_field(&self, field: &str) -> bool;

  /// Asigna el valor en memoria, sin persistir.
  fn set_field(&mut self, field: &str, value: String);

  /// Persiste sin disparar eventos de cambio.
  ///
  /// Guard de re-entrada: guardar desde el importer no debe re-encolar
  /// este mismo pipeline.
  fn save_quietly(&mut self) -> Result<(), AssetError>;

  /// Extensión del archivo en minúsculas; vacía si no tiene.
  fn extension(&self) -> String {
    Path::new(self.path())
      .extension()
      .and_then(|ext| ext.to_str())
      .map(|ext| ext.to_lowercase())
      .unwrap_or_default()
  }
}
