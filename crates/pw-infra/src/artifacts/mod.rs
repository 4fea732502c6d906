pub mod store;
pub mod thumbnail;

pub use store::FsArtifactStore;
pub use thumbnail::{Thumbnailer, THUMBNAIL_MAX_EDGE};
