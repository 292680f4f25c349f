pub mod playlist;
pub mod tracks_page;
