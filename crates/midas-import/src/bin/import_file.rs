use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use midas_core::domain::AssetId;
use midas_core::ports::{AssetError, MediaAsset};
use midas_import::{ImportConfig, Importer};
use midas_metadata::{AdapterRegistry, ExtractionConfig, MetadataReader};

/// Asset "suelto": un archivo local sin CMS detrás. Sirve para probar la
/// cadena de adapters y el mapeo de campos contra un archivo real.
struct LooseFile {
  id: AssetId,
  path: PathBuf,
  fields: Vec<(String, String)>,
}

impl MediaAsset for LooseFile {
  fn id(&self) -> AssetId {
    self.id
  }

  fn path(&self) -> &str {
    self.path.to_str().unwrap_or_default()
  }

  fn resolved_path(&self) -> Option<PathBuf> {
    Some(self.path.clone())
  }

  fn open_stream(&self) -> Result<Box<dyn Read + Send>, AssetError> {
    let file = File::open(&self.path).map_err(|e| AssetError::Stream(e.to_string()))?;
    Ok(Box::new(file))
  }

  // Acepta cualquier campo: aquí no hay blueprint que consultar.
  fn has_field(&self, _field: &str) -> bool {
    true
  }

  fn set_field(&mut self, field: &str, value: String) {
    self.fields.push((field.to_string(), value));
  }

  fn save_quietly(&mut self) -> Result<(), AssetError> {
    Ok(())
  }
}

#[tokio::main]
async fn main() {
  let path = std::env::args().nth(1).expect("usage: import_file <media-file>");

  let import_cfg = ImportConfig::load().expect("failed to load [importer] config");
  let extraction_cfg = ExtractionConfig::load().expect("failed to load [extraction] config");

  let filter = if import_cfg.debug { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::new(filter)).init();

  let registry = AdapterRegistry::new(extraction_cfg.adapter_mapping(), extraction_cfg.tool_paths());
  let importer = Importer::new(MetadataReader::new(registry), &import_cfg);

  let mut asset = LooseFile { id: AssetId::new(), path: PathBuf::from(path), fields: Vec::new() };

  match importer.import(&mut asset).await {
    Ok(report) => {
      println!("Campos resueltos: {} (saved={})", report.fields_set.len(), report.saved);
      for (field, value) in &asset.fields {
        println!("{field} = {value}");
      }
    }
    Err(e) => eprintln!("import failed: {e}"),
  }
}
