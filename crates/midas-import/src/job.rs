use tokio::sync::mpsc;
use tracing::{debug, warn};

use midas_core::ports::{ImportQueue, MediaAsset, MetadataSource, QueueError};

use crate::importer::Importer;

/// Trabajo de import: el asset más la cola lógica por la que entró.
pub struct ImportJob<A> {
  pub asset: A,
  pub queue: String,
}

/// Cola respaldada por un canal tokio, para despliegues de proceso único.
///
/// El nombre de la cola viaja con el trabajo, así que un mismo worker
/// puede atender varias colas lógicas sin multiplicar canales. En
/// despliegues con cola externa, este tipo se reemplaza por la
/// implementación del anfitrión del port `ImportQueue`.
pub struct ChannelQueue<A> {
  tx: mpsc::UnboundedSender<ImportJob<A>>,
}

impl<A: MediaAsset> ChannelQueue<A> {
  pub fn unbounded() -> (Self, mpsc::UnboundedReceiver<ImportJob<A>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self { tx }, rx)
  }
}

impl<A: MediaAsset> ImportQueue<A> for ChannelQueue<A> {
  fn enqueue(&self, asset: A, queue: &str) -> Result<(), QueueError> {
    self
      .tx
      .send(ImportJob { asset, queue: queue.to_string() })
      .map_err(|_| QueueError::Closed("import worker gone".to_string()))
  }
}

/// Drena la cola hasta que se cierre el canal.
///
/// Cada trabajo corre aislado: un import fallido se loguea y el worker
/// sigue con el siguiente. Un asset roto nunca frena a los demás.
pub async fn run_worker<A, R>(mut rx: mpsc::UnboundedReceiver<ImportJob<A>>, importer: Importer<'_, R>)
where
  A: MediaAsset,
  R: MetadataSource,
{
  while let Some(mut job) = rx.recv().await {
    debug!(asset = %job.asset.id(), queue = %job.queue, "import job started");

    match importer.import(&mut job.asset).await {
      Ok(report) => {
        debug!(
          asset = %job.asset.id(),
          fields = report.fields_set.len(),
          saved = report.saved,
          "import job finished"
        );
      }
      Err(e) => {
        warn!(asset = %job.asset.id(), error = %e, "import job failed");
      }
    }
  }
}
