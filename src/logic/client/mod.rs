pub mod fetch;
pub mod render;
pub mod url_utils;
