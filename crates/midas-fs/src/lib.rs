pub mod io;
pub mod staging;

pub use io::atomic_write_str;
pub use staging::{StageError, StagedFile};
