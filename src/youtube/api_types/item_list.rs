use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    pub(in crate::youtube) items: Vec<Item>,
    pub(in crate::youtube) next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub(in crate::youtube) content_details: ContentDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    pub(in crate::youtube) video_id: String,
}
