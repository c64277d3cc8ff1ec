mod backend;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use paths::{ConfigError, MidasPaths};

use once_cell::sync::Lazy;

/// Paths del proceso. `MIDAS_BASE_DIR` los redirige a un árbol portable
/// (lo usan los tests y los despliegues en contenedor).
pub static PATHS: Lazy<MidasPaths> = Lazy::new(|| MidasPaths::detect().expect("failed to init MidasPaths"));

/// Backend de configuración compartido por todos los crates del workspace.
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
