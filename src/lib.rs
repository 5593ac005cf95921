pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;
pub mod site;
pub mod templates;
pub mod theme;
pub mod utils;
