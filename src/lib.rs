pub mod app;
pub mod authz;
pub mod docs;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod routes;
pub mod stores;
pub mod utils;

// Re-export commonly used items for tests
pub use app::{create_app, create_app_with_state, AppState};
