//! Staffdesk - college staff record management
//!
//! A REST API over two tables, `department` and `staff`, layered as
//! handlers -> services -> repositories -> entities.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
