use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identificador opaco de un asset del CMS anfitrión.
///
/// Solo se usa para correlación en logs; Midas nunca lo interpreta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(Uuid);

impl AssetId {
  /// Genera un nuevo identificador único.
  pub fn new() -> Self {
    AssetId(Uuid::new_v4())
  }

  /// Construye un `AssetId` a partir de un `Uuid` existente.
  pub fn from_uuid(u: Uuid) -> Self {
    AssetId(u)
  }

  /// Devuelve el `Uuid` interno.
  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for AssetId {
  fn from(u: Uuid) -> Self {
    AssetId(u)
  }
}

impl From<AssetId> for Uuid {
  fn from(id: AssetId) -> Self {
    id.0
  }
}

impl fmt::Display for AssetId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
