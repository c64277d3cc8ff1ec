use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use midas_core::domain::MetadataResult;
use midas_core::ports::{MetadataSource, TagExtractor};

use crate::registry::AdapterRegistry;

/// Lector de metadatos: prueba la cadena de adapters de la extensión en
/// orden estricto y se queda con el primer resultado no vacío.
///
/// Nunca falla: la ausencia de metadatos es un estado terminal esperado,
/// y los fallos por adapter se absorben para que uno roto no tumbe la
/// cadena completa.
pub struct MetadataReader {
  registry: AdapterRegistry,
}

impl MetadataReader {
  pub fn new(registry: AdapterRegistry) -> Self {
    Self { registry }
  }

  pub async fn read(&self, path: &Path) -> MetadataResult {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    let adapters = self.registry.adapters_for(extension);

    if adapters.is_empty() {
      debug!(path = %path.display(), extension, "no adapter configured for file type");
      return MetadataResult::empty();
    }

    read_chain(path, &adapters).await
  }
}

#[async_trait]
impl MetadataSource for MetadataReader {
  async fn read(&self, path: &Path) -> MetadataResult {
    MetadataReader::read(self, path).await
  }
}

/// Camina la cadena en orden, secuencialmente. Tres salidas por adapter:
/// - error → log y siguiente (aislamiento por adapter),
/// - resultado con ambas capas vacías → siguiente,
/// - resultado con datos → corta y devuelve; los siguientes no se invocan.
pub async fn read_chain(path: &Path, adapters: &[Box<dyn TagExtractor>]) -> MetadataResult {
  for (index, adapter) in adapters.iter().enumerate() {
    debug!(adapter = adapter.name(), index, path = %path.display(), "trying adapter");

    match adapter.extract(path).await {
      Ok(result) if !result.is_empty() => {
        debug!(
          adapter = adapter.name(),
          mapped = result.mapped().len(),
          raw = result.raw().len(),
          "metadata found"
        );
        return result;
      }
      Ok(_) => {
        debug!(adapter = adapter.name(), "no metadata found with adapter");
      }
      Err(e) => {
        debug!(adapter = adapter.name(), error = %e, "adapter failed");
      }
    }
  }

  debug!(path = %path.display(), "metadata not found with any adapter");
  MetadataResult::empty()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;
  use std::sync::atomic::{AtomicUsize, Ordering};

  use async_trait::async_trait;
  use midas_core::domain::TagMap;
  use midas_core::ports::ExtractError;

  /// Doble de adapter con guion fijo y contador de invocaciones.
  struct Scripted {
    name: &'static str,
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
  }

  enum Outcome {
    Fails,
    Empty,
    Yields(&'static str, &'static str),
  }

  impl Scripted {
    fn boxed(name: &'static str, outcome: Outcome) -> (Box<dyn TagExtractor>, Arc<AtomicUsize>) {
      let calls = Arc::new(AtomicUsize::new(0));
      (Box::new(Scripted { name, outcome, calls: Arc::clone(&calls) }), calls)
    }
  }

  #[async_trait]
  impl TagExtractor for Scripted {
    fn name(&self) -> &'static str {
      self.name
    }

    async fn extract(&self, _path: &Path) -> Result<MetadataResult, ExtractError> {
      self.calls.fetch_add(1, Ordering::SeqCst);

      match &self.outcome {
        Outcome::Fails => Err(ExtractError::Unavailable("missing binary".to_string())),
        Outcome::Empty => Ok(MetadataResult::empty()),
        Outcome::Yields(key, value) => {
          let raw: TagMap = [(*key, *value)].into_iter().collect();
          Ok(MetadataResult::new(TagMap::new(), raw))
        }
      }
    }
  }

  #[tokio::test]
  async fn first_non_empty_result_short_circuits_the_chain() {
    let (first, first_calls) = Scripted::boxed("a", Outcome::Empty);
    let (second, second_calls) = Scripted::boxed("b", Outcome::Yields("title", "Sunset"));
    let (third, third_calls) = Scripted::boxed("c", Outcome::Yields("title", "never"));

    let result = read_chain(Path::new("photo.jpg"), &[first, second, third]).await;

    assert_eq!(result.raw().get("title"), Some("Sunset"));
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    // El adapter posterior al primer éxito no se invoca jamás.
    assert_eq!(third_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn adapter_failures_are_isolated_and_the_chain_continues() {
    let (first, _) = Scripted::boxed("a", Outcome::Fails);
    let (second, _) = Scripted::boxed("b", Outcome::Yields("credit", "Jane"));

    let result = read_chain(Path::new("photo.jpg"), &[first, second]).await;
    assert_eq!(result.raw().get("credit"), Some("Jane"));
  }

  #[tokio::test]
  async fn exhausted_chain_yields_empty_metadata_not_an_error() {
    let (first, _) = Scripted::boxed("a", Outcome::Fails);
    let (second, _) = Scripted::boxed("b", Outcome::Empty);

    let result = read_chain(Path::new("photo.jpg"), &[first, second]).await;
    assert!(result.is_empty());
  }

  #[tokio::test]
  async fn empty_chain_is_the_unsupported_terminal_case() {
    let result = read_chain(Path::new("photo.xyz"), &[]).await;
    assert!(result.is_empty());
  }
}
