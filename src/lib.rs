pub mod api_docs;
pub mod app;
pub mod config;
pub mod entities;
pub mod middleware;
pub mod prediction;
pub mod repositories;
pub mod routes;
pub mod static_service;
pub mod utils;
