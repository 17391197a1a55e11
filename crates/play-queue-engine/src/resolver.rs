//! Content resolution seam.
//!
//! The engine consumes a resolver that turns an album/playlist/song reference
//! into an ordered track list. Catalog and network details live behind this
//! trait; the engine only assumes the call may suspend for a while.

use async_trait::async_trait;
use play_queue_types::{ContentRef, Track};

/// Why a content reference could not be resolved into tracks.
#[derive(Debug)]
pub enum ResolveError {
    /// The referenced content does not exist in the catalog.
    NotFound,
    /// The catalog could not be reached or answered with an error.
    Unavailable(String),
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::NotFound => f.write_str("content not found"),
            ResolveError::Unavailable(reason) => write!(f, "catalog unavailable: {reason}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolves content references into ordered track lists.
#[async_trait]
pub trait ContentResolver: Send + Sync {
    async fn resolve(&self, content: &ContentRef) -> Result<Vec<Track>, ResolveError>;
}
