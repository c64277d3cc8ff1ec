use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Escritura atómica: volcamos a un temporal en el mismo directorio y lo
/// renombramos encima del destino, para que nadie vea el archivo a medias.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));

  let mut tmp = NamedTempFile::new_in(parent)?;
  tmp.write_all(contents.as_bytes())?;
  tmp.as_file().sync_all()?;
  tmp.persist(path).map_err(|e| e.error)?;

  Ok(())
}
