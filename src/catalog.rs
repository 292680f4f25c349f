use crate::error::ApiError;

/// An existing playlist on the destination platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    pub id: String,
    pub name: String,
}

/// A ranked search result on the destination platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub id: String,
    pub title: String,
}

/// Builds the descriptor a track is matched and cached under.
pub fn track_descriptor(title: &str, artist: &str) -> String {
    format!("{title} {artist}")
}

/// Read access to the platform playlists are migrated from.
pub trait CatalogSource {
    async fn playlist_name(&self, playlist_id: &str) -> Result<String, ApiError>;

    /// All track descriptors of the playlist, in playlist order.
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<String>, ApiError>;
}

/// The platform playlists are migrated to.
pub trait CatalogDestination {
    /// The caller's own playlists.
    async fn list_playlists(&self) -> Result<Vec<PlaylistRef>, ApiError>;

    /// Creates a private playlist and returns its id.
    async fn create_playlist(&self, name: &str, description: &str) -> Result<String, ApiError>;

    /// Item ids currently in the playlist.
    async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<String>, ApiError>;

    async fn search(&self, query: &str, max_results: u32)
    -> Result<Vec<SearchCandidate>, ApiError>;

    async fn insert_item(&self, playlist_id: &str, item_id: &str) -> Result<(), ApiError>;
}
