use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::{CatalogDestination, PlaylistRef, SearchCandidate};
use crate::error::ApiError;
use crate::youtube::api_types;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

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

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.client.get(url).query(query).send().await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.client.post(url).json(body).send().await?;
        Self::check(response).await?.json().await.map_err(Into::into)
    }

    async fn post_status<B: Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
        let response = self.client.post(url).json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, message })
    }
}

impl CatalogDestination for Client {
    async fn list_playlists(&self) -> Result<Vec<PlaylistRef>, ApiError> {
        let mut playlists = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("part", "snippet"),
                ("mine", "true"),
                ("maxResults", "50"),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.as_str()));
            }
            let page: api_types::playlist_list::Root = self
                .get_json(&format!("{API_BASE}/playlists"), &query)
                .await?;
            playlists.extend(page.items.into_iter().map(|playlist| PlaylistRef {
                id: playlist.id,
                name: playlist.snippet.title,
            }));
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(playlists)
    }

    async fn create_playlist(&self, name: &str, description: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "snippet": {"title": name, "description": description},
            "status": {"privacyStatus": "private"},
        });
        let created: api_types::playlist_resource::Root = self
            .post_json(&format!("{API_BASE}/playlists?part=snippet,status"), &body)
            .await?;
        Ok(created.id)
    }

    async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<String>, ApiError> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", "50"),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.as_str()));
            }
            let page: api_types::item_list::Root = self
                .get_json(&format!("{API_BASE}/playlistItems"), &query)
                .await?;
            items.extend(
                page.items
                    .into_iter()
                    .map(|item| item.content_details.video_id),
            );
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(items)
    }

    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchCandidate>, ApiError> {
        let max_results = max_results.to_string();
        let results: api_types::search_list::Root = self
            .get_json(
                &format!("{API_BASE}/search"),
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("maxResults", &max_results),
                    ("q", query),
                ],
            )
            .await?;
        Ok(results
            .items
            .into_iter()
            .filter_map(|item| {
                item.id.video_id.map(|id| SearchCandidate {
                    id,
                    title: item.snippet.title,
                })
            })
            .collect())
    }

    async fn insert_item(&self, playlist_id: &str, item_id: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "snippet": {
                "playlistId": playlist_id,
                "resourceId": {"kind": "youtube#video", "videoId": item_id},
            }
        });
        self.post_status(&format!("{API_BASE}/playlistItems?part=snippet"), &body)
            .await
    }
}
