use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use serde_json::Value;

use midas_core::domain::{MetadataResult, TagMap};
use midas_core::ports::{ExtractError, TagExtractor};

use crate::mapping;

/// Wrapper del binario `ffprobe`, para tags de contenedores de video y
/// audio (MP4, MOV, MKV, …).
#[derive(Debug, Clone)]
pub struct FfprobeExtractor {
  binary: PathBuf,
}

impl FfprobeExtractor {
  /// `binary` ausente o vacío → se confía en el PATH.
  pub fn new(binary: Option<PathBuf>) -> Self {
    let binary = binary.filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| PathBuf::from("ffprobe"));
    Self { binary }
  }
}

#[async_trait]
impl TagExtractor for FfprobeExtractor {
  fn name(&self) -> &'static str {
    "ffprobe"
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
    .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
    .arg(path)
    .output()
    .map_err(|e| ExtractError::Unavailable(format!("{}: {e}", binary.display())))?;

  if !output.status.success() {
    return Err(ExtractError::Io(String::from_utf8_lossy(&output.stderr).trim().to_string()));
  }

  let parsed: Value =
    serde_json::from_slice(&output.stdout).map_err(|e| ExtractError::Corrupt(format!("ffprobe json: {e}")))?;

  let mut raw = TagMap::new();

  if let Some(format) = parsed.get("format") {
    flatten_into(&mut raw, "format", format);
  }

  if let Some(streams) = parsed.get("streams").and_then(Value::as_array) {
    for (index, stream) in streams.iter().enumerate() {
      flatten_into(&mut raw, &format!("streams.{index}"), stream);
    }
  }

  let mapped = mapping::map_friendly(&raw);
  Ok(MetadataResult::new(mapped, raw))
}

/// Aplana el JSON jerárquico de ffprobe a claves con puntos
/// (`format.tags.title`), que es lo que el resolver direcciona.
fn flatten_into(raw: &mut TagMap, prefix: &str, value: &Value) {
  match value {
    Value::Object(map) => {
      for (key, child) in map {
        flatten_into(raw, &format!("{prefix}.{key}"), child);
      }
    }
    Value::Array(items) => {
      for (index, child) in items.iter().enumerate() {
        flatten_into(raw, &format!("{prefix}.{index}"), child);
      }
    }
    Value::String(s) => {
      let s = s.trim();
      if !s.is_empty() {
        raw.insert(prefix, s);
      }
    }
    Value::Number(n) => raw.insert(prefix, n.to_string()),
    Value::Bool(b) => raw.insert(prefix, b.to_string()),
    Value::Null => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn flattens_nested_output_with_dotted_keys() {
    let mut raw = TagMap::new();
    let format = json!({
      "filename": "clip.mp4",
      "duration": "12.48",
      "tags": { "title": "Holiday Clip", "creation_time": "2024-05-01T10:00:00Z" }
    });

    flatten_into(&mut raw, "format", &format);

    assert_eq!(raw.get("format.filename"), Some("clip.mp4"));
    assert_eq!(raw.get("format.tags.title"), Some("Holiday Clip"));
    assert_eq!(raw.get("format.tags.creation_time"), Some("2024-05-01T10:00:00Z"));
  }

  #[test]
  fn friendly_layer_picks_container_tags() {
    let mut raw = TagMap::new();
    flatten_into(&mut raw, "format", &json!({ "tags": { "title": "Holiday Clip" } }));

    let mapped = mapping::map_friendly(&raw);
    assert_eq!(mapped.get("title"), Some("Holiday Clip"));
  }

  #[test]
  fn missing_binary_reports_unavailable() {
    let result = extract_sync(Path::new("/nonexistent/ffprobe"), Path::new("clip.mp4"));
    assert!(matches!(result, Err(ExtractError::Unavailable(_))));
  }
}
