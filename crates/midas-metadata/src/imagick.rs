use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;

use midas_core::domain::{MetadataResult, TagMap};
use midas_core::ports::{ExtractError, TagExtractor};

use crate::mapping;

/// Wrapper de `identify -verbose` (ImageMagick).
///
/// Menos fiable que exiftool para metadatos embebidos, pero suele estar ya
/// instalado donde hay pipelines de imágenes.
#[derive(Debug, Clone)]
pub struct ImagickExtractor {
  binary: PathBuf,
}

impl ImagickExtractor {
  /// `binary` ausente o vacío → se confía en el PATH.
  pub fn new(binary: Option<PathBuf>) -> Self {
    let binary = binary.filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| PathBuf::from("identify"));
    Self { binary }
  }
}

#[async_trait]
impl TagExtractor for ImagickExtractor {
  fn name(&self) -> &'static str {
    "imagick"
  }

  async fn extract(&self, path: &Path) -> Result<MetadataResult, ExtractError> {
    let binary = self.binary.clone();
    let path = PathBuf::from(path);

    tokio::task::spawn_blocking(move || extract_sync(&binary, &path))
      .await
      .map_err(|e| ExtractError::Internal(format!("join error: {e}")))?
  }
}

fn extract_sync(binary: &Path, path: &Path) -> Result<MetadataResult, ExtractError> {
  let output = Command::new(binary)
    .arg("-verbose")
    .arg(path)
    .output()
    .map_err(|e| ExtractError::Unavailable(format!("{}: {e}", binary.display())))?;

  if !output.status.success() {
    return Err(ExtractError::Io(String::from_utf8_lossy(&output.stderr).trim().to_string()));
  }

  let raw = parse_verbose(&String::from_utf8_lossy(&output.stdout));
  let mapped = mapping::map_friendly(&raw);
  Ok(MetadataResult::new(mapped, raw))
}

/// Parsea el bloque `Properties:` del output de `identify -verbose`:
/// líneas `clave: valor` con cuatro espacios de indentación, claves tipo
/// `exif:Make` o `date:create`.
fn parse_verbose(text: &str) -> TagMap {
  let mut raw = TagMap::new();
  let mut in_properties = false;

  for line in text.lines() {
    let indent = line.len() - line.trim_start().len();
    let trimmed = line.trim_end();

    if trimmed.trim() == "Properties:" {
      in_properties = true;
      continue;
    }

    if in_properties {
      // Cualquier línea menos indentada cierra el bloque.
      if indent < 4 {
        in_properties = false;
        continue;
      }

      if let Some((key, value)) = trimmed.trim_start().split_once(": ") {
        let value = value.trim();
        if !value.is_empty() {
          raw.insert(key.trim(), value);
        }
      }
    }
  }

  raw
}
