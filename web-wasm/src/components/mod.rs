//! UIコンポーネント

pub mod camera_view;
pub mod header;
pub mod notice_banner;
pub mod progress_bar;
pub mod result_card;
pub mod result_feed;
pub mod upload_area;
