use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

use toml_edit::{DocumentMut, Item};

use crate::paths::{ConfigError, MidasPaths};

/// Backend de configuración por secciones.
///
/// Cada crate del workspace es dueño de una sección del archivo
/// (`[importer]`, `[extraction]`, …) y nunca toca las demás. Las
/// escrituras preservan comentarios y secciones ajenas.
pub trait ConfigBackend {
  /// Lee la sección. Archivo o sección inexistentes → `T::default()`,
  /// para que un despliegue recién instalado arranque sin config previa.
  fn load_section<T: DeserializeOwned + Default>(&self, section: &str) -> Result<T, ConfigError>;

  /// Escribe la sección encima del documento existente.
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  paths: MidasPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: MidasPaths) -> Self {
    Self { paths }
  }

  fn read_document(&self) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(self.paths.config_file()) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned + Default>(&self, section: &str) -> Result<T, ConfigError> {
    let Some(content) = self.read_document()? else {
      return Ok(T::default());
    };

    let document: toml::Value = toml::from_str(&content)?;

    let Some(table) = document.get(section) else {
      return Ok(T::default());
    };

    table.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let mut doc: DocumentMut = match self.read_document()? {
      Some(content) => {
        content.parse().map_err(|e| ConfigError::Other(format!("parse config document: {e}")))?
      }
      None => DocumentMut::new(),
    };

    // Serializamos la sección por separado y la re-parseamos como `Item`
    // para insertarla sin tocar los comentarios del resto del documento.
    let rendered =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let item: Item = rendered
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section [{section}]: {e}")))?
      .into_item();

    doc[section] = item;

    midas_fs::atomic_write_str(&self.paths.config_file(), &doc.to_string())?;
    Ok(())
  }
}
