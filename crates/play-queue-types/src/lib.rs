use serde::{Deserialize, Serialize};

/// Opaque catalog identifier of a track.
///
/// Distinct from per-queue instance identity: the same `TrackId` may occupy
/// several queue slots at once (repeated in up-next and the user queue).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl TrackId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A playable track as resolved from the catalog.
///
/// Carries only what the player surfaces need: display metadata, artwork, and
/// where to fetch the audio from. Catalog lookups live outside this crate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    /// Catalog identifier.
    pub id: TrackId,
    /// Display title.
    pub title: String,
    /// Artist names, primary first.
    pub artists: Vec<String>,
    /// Artwork location, if the catalog provided one.
    pub artwork_url: Option<String>,
    /// Stream location for the audio payload.
    pub stream_url: String,
    /// Duration in milliseconds (best-effort).
    pub duration_ms: Option<u64>,
}

/// Content the queue can be loaded from, and the attribution of what is
/// currently playing ("Playing from <name>").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentRef {
    /// A catalog album.
    Album { id: String, name: String },
    /// A catalog or user playlist.
    Playlist { id: String, name: String },
    /// A single song (queue loaded from one track's context).
    Song { id: TrackId, name: String },
}

impl ContentRef {
    /// Display name used by attribution labels.
    pub fn name(&self) -> &str {
        match self {
            ContentRef::Album { name, .. }
            | ContentRef::Playlist { name, .. }
            | ContentRef::Song { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_ref_serializes_with_kind_tag() {
        let content = ContentRef::Album {
            id: "alb-1".to_string(),
            name: "Blue Train".to_string(),
        };

        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["kind"], "album");
        assert_eq!(json["name"], "Blue Train");
    }

    #[test]
    fn content_ref_name_covers_all_variants() {
        let song = ContentRef::Song {
            id: TrackId::from("trk-9"),
            name: "Naima".to_string(),
        };
        assert_eq!(song.name(), "Naima");

        let playlist = ContentRef::Playlist {
            id: "pl-2".to_string(),
            name: "Late Night".to_string(),
        };
        assert_eq!(playlist.name(), "Late Night");
    }
}
