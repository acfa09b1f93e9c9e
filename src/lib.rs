pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod media;
pub mod observability;
pub mod routes;

pub use error::ApiError;
pub use routes::{AppState, router};
