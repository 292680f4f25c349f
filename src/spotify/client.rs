use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::catalog::{self, CatalogSource};
use crate::error::ApiError;
use crate::spotify::api_types;

pub struct Client {
    client: reqwest::Client,
}

impl Client {
    pub fn new(access_token: &str) -> Result<Self> {
        let headers = {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                "Authorization",
                format!("Bearer {access_token}").try_into()?,
            );
            headers
        };
        let client = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }
        Ok(response.json().await?)
    }
}

impl CatalogSource for Client {
    async fn playlist_name(&self, playlist_id: &str) -> Result<String, ApiError> {
        let playlist: api_types::playlist::Root = self
            .get_json(&format!(
                "https://api.spotify.com/v1/playlists/{playlist_id}?fields=name",
            ))
            .await?;
        Ok(playlist.name)
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<String>, ApiError> {
        let mut descriptors = Vec::new();
        let mut url =
            format!("https://api.spotify.com/v1/playlists/{playlist_id}/tracks?limit=100");
        loop {
            let page: api_types::tracks_page::Root = self.get_json(&url).await?;
            for item in page.items {
                let Some(track) = item.track else { continue };
                let Some(artist) = track.artists.first() else {
                    continue;
                };
                descriptors.push(catalog::track_descriptor(&track.name, &artist.name));
            }
            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }
        Ok(descriptors)
    }
}
