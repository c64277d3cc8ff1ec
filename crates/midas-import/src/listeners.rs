use tracing::debug;

use midas_core::ports::{ImportQueue, MediaAsset, QueueError};

use crate::config::ImportConfig;

/// Subida de un asset: si la extensión pasa el allow-list, se encola un
/// trabajo de import. Devuelve si se encoló o no.
pub fn on_asset_uploaded<A, Q>(asset: A, cfg: &ImportConfig, queue: &Q) -> Result<bool, QueueError>
where
  A: MediaAsset,
  Q: ImportQueue<A>,
{
  enqueue_if_allowed(asset, cfg, queue)
}

/// Re-subida: igual que la subida, pero respetando el flag de
/// sobreescritura; hay instalaciones que no quieren pisar metadatos
/// corregidos a mano.
pub fn on_asset_reuploaded<A, Q>(asset: A, cfg: &ImportConfig, queue: &Q) -> Result<bool, QueueError>
where
  A: MediaAsset,
  Q: ImportQueue<A>,
{
  if !cfg.overwrite_on_reupload {
    debug!(asset = %asset.id(), "overwrite on reupload disabled, not enqueuing");
    return Ok(false);
  }

  enqueue_if_allowed(asset, cfg, queue)
}

fn enqueue_if_allowed<A, Q>(asset: A, cfg: &ImportConfig, queue: &Q) -> Result<bool, QueueError>
where
  A: MediaAsset,
  Q: ImportQueue<A>,
{
  let extension = asset.extension();

  if !cfg.allows_extension(&extension) {
    debug!(asset = %asset.id(), %extension, "extension not in allow-list, not enqueuing");
    return Ok(false);
  }

  debug!(asset = %asset.id(), queue = %cfg.queue, "enqueuing import job");
  queue.enqueue(asset, &cfg.queue)?;
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::FakeAsset;
  use midas_core::domain::{AssetId, ExtensionPattern};
  use std::sync::Mutex;

  /// Cola que solo registra qué se encoló y dónde.
  #[derive(Default)]
  struct MemoryQueue {
    jobs: Mutex<Vec<(AssetId, String)>>,
  }

  impl MemoryQueue {
    fn enqueued(&self) -> Vec<(AssetId, String)> {
      self.jobs.lock().unwrap().clone()
    }
  }

  impl ImportQueue<FakeAsset> for MemoryQueue {
    fn enqueue(&self, asset: FakeAsset, queue: &str) -> Result<(), QueueError> {
      self.jobs.lock().unwrap().push((asset.id(), queue.to_string()));
      Ok(())
    }
  }

  fn config_allowing(extensions: &[&str]) -> ImportConfig {
    ImportConfig {
      extensions: extensions.iter().map(|e| ExtensionPattern::parse(e)).collect(),
      ..ImportConfig::default()
    }
  }

  #[test]
  fn disallowed_extension_is_never_enqueued() {
    let cfg = config_allowing(&["jpg", "png"]);
    let queue = MemoryQueue::default();

    let enqueued = on_asset_uploaded(FakeAsset::new("uploads/photo.PDF", &[]), &cfg, &queue).unwrap();

    assert!(!enqueued);
    assert!(queue.enqueued().is_empty());
  }

  #[test]
  fn allowed_extension_is_enqueued_exactly_once_case_insensitively() {
    let cfg = config_allowing(&["jpg", "png"]);
    let queue = MemoryQueue::default();

    let enqueued = on_asset_uploaded(FakeAsset::new("uploads/photo.JPG", &[]), &cfg, &queue).unwrap();

    assert!(enqueued);
    let jobs = queue.enqueued();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].1, "default");
  }

  #[test]
  fn wildcard_allow_list_enqueues_anything() {
    let cfg = config_allowing(&["*"]);
    let queue = MemoryQueue::default();

    assert!(on_asset_uploaded(FakeAsset::new("docs/file.pdf", &[]), &cfg, &queue).unwrap());
    assert!(on_asset_uploaded(FakeAsset::new("clips/video.MOV", &[]), &cfg, &queue).unwrap());
    assert_eq!(queue.enqueued().len(), 2);
  }

  #[test]
  fn jobs_land_on_the_configured_queue() {
    let mut cfg = config_allowing(&["jpg"]);
    cfg.queue = "assets".to_string();
    let queue = MemoryQueue::default();

    on_asset_uploaded(FakeAsset::new("uploads/photo.jpg", &[]), &cfg, &queue).unwrap();

    assert_eq!(queue.enqueued()[0].1, "assets");
  }

  #[test]
  fn reupload_respects_the_overwrite_flag() {
    let mut cfg = config_allowing(&["jpg"]);
    cfg.overwrite_on_reupload = false;
    let queue = MemoryQueue::default();

    let enqueued = on_asset_reuploaded(FakeAsset::new("uploads/photo.jpg", &[]), &cfg, &queue).unwrap();
    assert!(!enqueued);

    cfg.overwrite_on_reupload = true;
    let enqueued = on_asset_reuploaded(FakeAsset::new("uploads/photo.jpg", &[]), &cfg, &queue).unwrap();
    assert!(enqueued);
    assert_eq!(queue.enqueued().len(), 1);
  }
}
