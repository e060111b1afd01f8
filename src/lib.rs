//! DisasterSense backend: incident reports, newsletter signups and
//! emergency kit planning over a JSON HTTP API.

pub mod config;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;
pub mod utils;

pub use router::create_router;
pub use services::AppState;
