pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod export;
pub mod fetch_guard;
pub mod icons;
pub mod list_page;
pub mod list_utils;
pub mod preferences;
