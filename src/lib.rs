pub mod api;
pub mod config;
pub mod downloader;
pub mod observability;
