use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    pub(in crate::spotify) items: Vec<Item>,
    /// URL of the next page; null on the last page.
    pub(in crate::spotify) next: Option<String>,
}

#[derive(Deserialize)]
pub struct Item {
    /// Null for removed or locally-added entries.
    pub(in crate::spotify) track: Option<Track>,
}

#[derive(Deserialize)]
pub struct Track {
    pub(in crate::spotify) artists: Vec<Artist>,
    pub(in crate::spotify) name: String,
}

#[derive(Deserialize)]
pub struct Artist {
    pub(in crate::spotify) name: String,
}
