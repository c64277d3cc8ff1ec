pub mod asset;
pub mod extractor;
pub mod queue;
pub mod reader;

pub use asset::{AssetError, MediaAsset};
pub use extractor::{ExtractError, TagExtractor};
pub use queue::{ImportQueue, QueueError};
pub use reader::MetadataSource;
