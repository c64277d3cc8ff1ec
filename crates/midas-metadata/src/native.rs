use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use midas_core::domain::{MetadataResult, TagMap};
use midas_core::ports::{ExtractError, TagExtractor};

use crate::mapping;

/// Parser EXIF in-process, sin binarios externos.
///
/// Rápido y limitado: cubre los contenedores que `kamadak-exif` sabe leer
/// (JPEG, TIFF, PNG, WebP, HEIF). Para lo demás se encadena un adapter
/// externo detrás de este.
#[derive(Debug, Clone, Default)]
pub struct NativeExtractor;

impl NativeExtractor {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl TagExtractor for NativeExtractor {
  fn name(&self) -> &'static str {
    "native"
  }

  async fn extract(&self, path: &Path) -> Result<MetadataResult, ExtractError> {
    let path = PathBuf::from(path);

    tokio::task::spawn_blocking(move || extract_sync(&path))
      .await
      .map_err(|e| ExtractError::Internal(format!("join error: {e}")))?
  }
}

fn extract_sync(path: &Path) -> Result<MetadataResult, ExtractError> {
  let file = File::open(path).map_err(|e| ExtractError::Io(format!("open {}: {e}", path.display())))?;
  let mut reader = BufReader::new(file);

  let exif = match exif::Reader::new().read_from_container(&mut reader) {
    Ok(exif) => exif,
    // Contenedor sin segmento EXIF: "sin metadatos", no un error.
    Err(exif::Error::NotFound(_)) => return Ok(MetadataResult::empty()),
    Err(exif::Error::Io(e)) => return Err(ExtractError::Io(e.to_string())),
    Err(e) => return Err(ExtractError::Corrupt(e.to_string())),
  };

  let mut raw = TagMap::new();

  for field in exif.fields() {
    // Solo la imagen primaria; el thumbnail duplica tags.
    if field.ifd_num != exif::In::PRIMARY {
      continue;
    }

    let value = field.display_value().with_unit(&exif).to_string();
    if !value.trim().is_empty() {
      raw.insert(field.tag.to_string(), value);
    }
  }

  let mapped = mapping::map_friendly(&raw);
  Ok(MetadataResult::new(mapped, raw))
}
