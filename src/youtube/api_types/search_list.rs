use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    pub(in crate::youtube) items: Vec<Item>,
}

#[derive(Deserialize)]
pub struct Item {
    pub(in crate::youtube) id: Id,
    pub(in crate::youtube) snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Id {
    /// Absent for non-video results.
    pub(in crate::youtube) video_id: Option<String>,
}

#[derive(Deserialize)]
pub struct Snippet {
    pub(in crate::youtube) title: String,
}
