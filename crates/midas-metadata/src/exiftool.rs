use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use serde_json::Value;

use midas_core::domain::{MetadataResult, TagMap};
use midas_core::ports::{ExtractError, TagExtractor};

use crate::mapping;

/// Wrapper del binario `exiftool`.
///
/// El más completo de la cadena: lee EXIF/IPTC/XMP de cientos de formatos,
/// a cambio de un proceso externo por archivo.
#[derive(Debug, Clone)]
pub struct ExiftoolExtractor {
  binary: PathBuf,
}

impl ExiftoolExtractor {
  /// `binary` ausente o vacío → se confía en el PATH.
  ///
  /// Construir nunca falla: un binario inexistente recién falla al
  /// invocar, y ese fallo lo absorbe la cadena del reader.
  pub fn new(binary: Option<PathBuf>) -> Self {
    let binary = binary.filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| PathBuf::from("exiftool"));
    Self { binary }
  }
}

#[async_trait]
impl TagExtractor for ExiftoolExtractor {
  fn name(&self) -> &'static str {
    "exiftool"
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
  // -j JSON, -G claves con grupo (EXIF:Make), -a permite duplicados.
  let output = Command::new(binary)
    .args(["-j", "-G", "-a"])
    .arg(path)
    .output()
    .map_err(|e| ExtractError::Unavailable(format!("{}: {e}", binary.display())))?;

  if !output.status.success() {
    return Err(ExtractError::Io(String::from_utf8_lossy(&output.stderr).trim().to_string()));
  }

  let parsed: Value =
    serde_json::from_slice(&output.stdout).map_err(|e| ExtractError::Corrupt(format!("exiftool json: {e}")))?;

  // exiftool emite un array con un objeto por archivo de entrada.
  let Some(tags) = parsed.as_array().and_then(|files| files.first()).and_then(Value::as_object) else {
    return Ok(MetadataResult::empty());
  };

  let mut raw = TagMap::new();

  for (key, value) in tags {
    if key == "SourceFile" {
      continue;
    }

    if let Some(rendered) = scalar_to_string(value) {
      raw.insert(key.clone(), rendered);
    }
  }

  let mapped = mapping::map_friendly(&raw);
  Ok(MetadataResult::new(mapped, raw))
}

/// Render plano de un valor JSON de exiftool. Las listas (Keywords, etc.)
/// se unen con comas; los objetos anidados no aparecen con `-j`.
fn scalar_to_string(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => {
      let s = s.trim();
      if s.is_empty() { None } else { Some(s.to_string()) }
    }
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Array(items) => {
      let rendered: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
      if rendered.is_empty() { None } else { Some(rendered.join(", ")) }
    }
    _ => None,
  }
}
