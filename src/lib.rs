pub mod app;
pub mod compat;
pub mod config;
pub mod connect;
pub mod docs;
pub mod errors;
pub mod hooks;
pub mod kafka;
pub mod models;
pub mod routes;
pub mod utils;

// Re-export commonly used items for tests
pub use app::create_app;
