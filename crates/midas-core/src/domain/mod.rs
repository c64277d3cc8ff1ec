pub mod adapters;
pub mod fields;
pub mod ids;
pub mod metadata;

pub use adapters::{AdapterEntry, AdapterKind, AdapterMapping, ExtensionPattern};
pub use fields::{FieldSpec, SourceKeys};
pub use ids::AssetId;
pub use metadata::{MetadataResult, TagMap};
