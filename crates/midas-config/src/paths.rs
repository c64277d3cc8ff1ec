use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("directories error: could not determine config directory")]
  Directories,

  #[error("other: {0}")]
  Other(String),
}

/// Dónde vive la configuración de Midas.
#[derive(Debug, Clone)]
pub struct MidasPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
}

impl MidasPaths {
  /// Detecta las rutas: `MIDAS_BASE_DIR` si está definida, directorios
  /// del sistema si no. Crea el directorio de config si hace falta.
  pub fn detect() -> Result<Self, ConfigError> {
    let paths = match std::env::var("MIDAS_BASE_DIR") {
      Ok(base) => Self::portable(PathBuf::from(base)),
      Err(_) => Self::system()?,
    };

    std::fs::create_dir_all(&paths.config_dir)?;
    Ok(paths)
  }

  fn portable(base: PathBuf) -> Self {
    let config_dir = base.join("config");
    Self { base_dir: base, config_dir }
  }

  fn system() -> Result<Self, ConfigError> {
    let dirs = ProjectDirs::from("com", "midas", "midas").ok_or(ConfigError::Directories)?;
    Ok(Self { base_dir: dirs.config_dir().to_path_buf(), config_dir: dirs.config_dir().to_path_buf() })
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("midas.toml")
  }
}
