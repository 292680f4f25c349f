use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    pub(in crate::youtube) items: Vec<Playlist>,
    pub(in crate::youtube) next_page_token: Option<String>,
}

#[derive(Deserialize)]
pub struct Playlist {
    pub(in crate::youtube) id: String,
    pub(in crate::youtube) snippet: Snippet,
}

#[derive(Deserialize)]
pub struct Snippet {
    pub(in crate::youtube) title: String,
}
