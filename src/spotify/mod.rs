mod api_types;
mod client;

pub use client::Client;

/// Spotify playlist IDs are 22 base62 characters.
pub fn validate_playlist_id(id: &str) -> bool {
    id.len() == 22 && id.chars().all(|c| c.is_ascii_alphanumeric())
}
