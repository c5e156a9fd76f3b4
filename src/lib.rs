pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod service;

pub use config::Config;
pub use error::ApiError;
