pub mod config;
pub mod exiftool;
pub mod ffprobe;
pub mod imagick;
pub mod mapping;
pub mod native;
pub mod reader;
pub mod registry;

pub use config::ExtractionConfig;
pub use exiftool::ExiftoolExtractor;
pub use ffprobe::FfprobeExtractor;
pub use imagick::ImagickExtractor;
pub use native::NativeExtractor;
pub use reader::MetadataReader;
pub use registry::{AdapterRegistry, ToolPaths};
