use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    pub(in crate::youtube) id: String,
}
