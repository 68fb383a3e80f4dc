pub mod application;
pub mod endpoints;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schemas;
pub mod services;

// Short paths for the application layer
pub use application::config;
pub use application::database as db;
pub use application::error;
pub use application::state;
