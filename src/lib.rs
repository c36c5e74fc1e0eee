pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod presentation;
pub mod search;
pub mod suggestions;
pub mod utils;
