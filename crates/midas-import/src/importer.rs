use std::path::PathBuf;

use tracing::debug;

use midas_core::domain::MetadataResult;
use midas_core::ports::{AssetError, MediaAsset, MetadataSource};
use midas_core::services::resolver;
use midas_fs::StagedFile;

use crate::config::ImportConfig;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
  /// No se pudieron leer los bytes del recurso. Es el único fallo fatal
  /// del pipeline: sin archivo no hay nada que importar.
  #[error("resource unreadable: {0}")]
  ResourceUnreadable(String),

  /// El registro no se pudo persistir después de asignar campos.
  #[error("save failed: {0}")]
  Save(#[from] AssetError),
}

/// Resultado de un run, para logs y tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportReport {
  /// Campos asignados, en orden de configuración.
  pub fields_set: Vec<String>,

  /// Si el registro se persistió (como mucho una vez, y solo con cambios).
  pub saved: bool,
}

/// Orquestador de un import.
///
/// El run completo es secuencial: resolver una ruta local legible, leer
/// metadatos UNA vez, resolver cada campo configurado contra ese
/// resultado, y persistir el registro una única vez si algo cambió. Runs
/// de assets distintos pueden correr en paralelo (cada uno con su propio
/// contexto y su propio temporal); dentro de un run no hay concurrencia.
pub struct Importer<'a, R: MetadataSource> {
  reader: R,
  cfg: &'a ImportConfig,
}

impl<'a, R: MetadataSource> Importer<'a, R> {
  pub fn new(reader: R, cfg: &'a ImportConfig) -> Self {
    Self { reader, cfg }
  }

  pub async fn import<A: MediaAsset>(&self, asset: &mut A) -> Result<ImportReport, ImportError> {
    // Sin campos configurados no hay trabajo; ni siquiera se abre el
    // archivo.
    if self.cfg.fields.is_empty() {
      debug!(asset = %asset.id(), "no fields configured, skipping import");
      return Ok(ImportReport::default());
    }

    // El guard mantiene vivo el staging hasta el final del run; el
    // directorio temporal se borra en cualquier salida, errores incluidos.
    let (local_path, _staged) = self.fetch_local(asset)?;

    let metadata = self.reader.read(&local_path).await;
    debug!(
      asset = %asset.id(),
      mapped = metadata.mapped().len(),
      raw = metadata.raw().len(),
      "metadata read"
    );

    self.apply_fields(asset, &metadata)
  }

  /// Ruta local legible para el archivo del asset.
  ///
  /// Discos locales: la ruta resuelta tal cual. Discos remotos (S3 y
  /// compañía): staging del stream a un temporal único, conservando el
  /// nombre base porque varios extractores deciden por la extensión.
  fn fetch_local<A: MediaAsset>(&self, asset: &A) -> Result<(PathBuf, Option<StagedFile>), ImportError> {
    if let Some(resolved) = asset.resolved_path() {
      if resolved.exists() {
        return Ok((resolved, None));
      }
    }

    let mut stream = asset.open_stream().map_err(|e| ImportError::ResourceUnreadable(e.to_string()))?;

    let staged = StagedFile::from_stream(stream.as_mut(), asset.path())
      .map_err(|e| ImportError::ResourceUnreadable(e.to_string()))?;

    debug!(asset = %asset.id(), staged = %staged.path().display(), "asset staged to temporary file");
    Ok((staged.path().to_path_buf(), Some(staged)))
  }

  fn apply_fields<A: MediaAsset>(
    &self,
    asset: &mut A,
    metadata: &MetadataResult,
  ) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport::default();

    for spec in &self.cfg.fields {
      if !asset.has_field(&spec.target) {
        debug!(asset = %asset.id(), field = %spec.target, "field not in blueprint, skipping");
        continue;
      }

      // Una resolución sin resultado jamás pisa un valor existente: solo
      // se asigna cuando hay valor no vacío.
      if let Some(value) = resolver::resolve(&spec.sources, metadata, self.cfg.loose_mapping) {
        debug!(asset = %asset.id(), field = %spec.target, "field resolved from metadata");
        asset.set_field(&spec.target, value);
        report.fields_set.push(spec.target.clone());
      }
    }

    if report.fields_set.is_empty() {
      debug!(asset = %asset.id(), "nothing resolved, record left untouched");
      return Ok(report);
    }

    asset.save_quietly()?;
    report.saved = true;
    Ok(report)
  }
}
