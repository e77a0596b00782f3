pub mod analytics;
pub mod api;
pub mod config;
pub mod export;
pub mod filter;
pub mod models;
pub mod store;
pub mod upload;
