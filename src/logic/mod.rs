pub mod client;
pub mod config;
pub mod fleet;
pub mod status;
pub mod types;
