pub mod item_list;
pub mod playlist_list;
pub mod playlist_resource;
pub mod search_list;
