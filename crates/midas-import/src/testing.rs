use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use midas_core::domain::{AssetId, MetadataResult, TagMap};
use midas_core::ports::{AssetError, MediaAsset, MetadataSource};

/// Asset en memoria con contadores compartidos, para poder observarlo
/// incluso después de moverlo a una cola.
pub(crate) struct FakeAsset {
  id: AssetId,
  path: String,
  resolved: Option<PathBuf>,
  bytes: Option<Vec<u8>>,
  schema: Vec<String>,
  values: Arc<Mutex<BTreeMap<String, String>>>,
  saves: Arc<AtomicUsize>,
  fail_stream: bool,
  fail_save: bool,
}

impl FakeAsset {
  pub(crate) fn new(path: &str, schema: &[&str]) -> Self {
    Self {
      id: AssetId::new(),
      path: path.to_string(),
      resolved: None,
      bytes: None,
      schema: schema.iter().map(|s| s.to_string()).collect(),
      values: Arc::new(Mutex::new(BTreeMap::new())),
      saves: Arc::new(AtomicUsize::new(0)),
      fail_stream: false,
      fail_save: false,
    }
  }

  pub(crate) fn with_resolved(mut self, path: PathBuf) -> Self {
    self.resolved = Some(path);
    self
  }

  pub(crate) fn with_bytes(mut self, bytes: &[u8]) -> Self {
    self.bytes = Some(bytes.to_vec());
    self
  }

  pub(crate) fn failing_stream(mut self) -> Self {
    self.fail_stream = true;
    self
  }

  pub(crate) fn failing_save(mut self) -> Self {
    self.fail_save = true;
    self
  }

  pub(crate) fn preset(&mut self, field: &str, value: &str) {
    self.values.lock().unwrap().insert(field.to_string(), value.to_string());
  }

  pub(crate) fn value_of(&self, field: &str) -> Option<String> {
    self.values.lock().unwrap().get(field).cloned()
  }

  pub(crate) fn save_count(&self) -> usize {
    self.saves.load(Ordering::SeqCst)
  }

  /// Handles compartidos para seguir observando un asset ya movido.
  pub(crate) fn observers(&self) -> (Arc<Mutex<BTreeMap<String, String>>>, Arc<AtomicUsize>) {
    (Arc::clone(&self.values), Arc::clone(&self.saves))
  }
}

impl MediaAsset for FakeAsset {
  fn id(&self) -> AssetId {
    self.id
  }

  fn path(&self) -> &str {
    &self.path
  }

  fn resolved_path(&self) -> Option<PathBuf> {
    self.resolved.clone()
  }

  fn open_stream(&self) -> Result<Box<dyn Read + Send>, AssetError> {
    if self.fail_stream {
      return Err(AssetError::Stream("backing store offline".to_string()));
    }

    match &self.bytes {
      Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
      None => Err(AssetError::Stream("no bytes behind this asset".to_string())),
    }
  }

  fn has_field(&self, field: &str) -> bool {
    self.schema.iter().any(|declared| declared == field)
  }

  fn set_field(&mut self, field: &str, value: String) {
    self.values.lock().unwrap().insert(field.to_string(), value);
  }

  fn save_quietly(&mut self) -> Result<(), AssetError> {
    if self.fail_save {
      return Err(AssetError::Store("record store rejected the write".to_string()));
    }

    self.saves.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}

/// Fuente de metadatos con guion fijo; registra la última ruta leída para
/// poder afirmar sobre el staging.
pub(crate) struct StubSource {
  result: MetadataResult,
  last_path: Mutex<Option<PathBuf>>,
}

impl StubSource {
  pub(crate) fn empty() -> Self {
    Self { result: MetadataResult::empty(), last_path: Mutex::new(None) }
  }

  pub(crate) fn mapped(pairs: &[(&str, &str)]) -> Self {
    let mapped: TagMap = pairs.iter().copied().collect();
    Self { result: MetadataResult::new(mapped, TagMap::new()), last_path: Mutex::new(None) }
  }

  pub(crate) fn with_raw(self, pairs: &[(&str, &str)]) -> Self {
    let raw: TagMap = pairs.iter().copied().collect();
    Self { result: MetadataResult::new(self.result.mapped().clone(), raw), last_path: self.last_path }
  }

  pub(crate) fn last_path(&self) -> Option<PathBuf> {
    self.last_path.lock().unwrap().clone()
  }
}

#[async_trait]
impl MetadataSource for StubSource {
  async fn read(&self, path: &Path) -> MetadataResult {
    *self.last_path.lock().unwrap() = Some(path.to_path_buf());
    self.result.clone()
  }
}
