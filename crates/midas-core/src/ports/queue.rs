use crate::ports::asset::MediaAsset;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
  #[error("queue closed: {0}")]
  Closed(String),

  #[error("internal error: {0}")]
  Internal(String),
}

/// Port de encolado de trabajos de import.
///
/// El transporte es decisión del anfitrión (workers, crons, lo que sea);
/// desde aquí solo se ve "encola este asset en la cola con nombre".
pub trait ImportQueue<A: MediaAsset> {
  fn enqueue(&self, asset: A, queue: &str) -> Result<(), QueueError>;
}
