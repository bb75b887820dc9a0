//! Request/response middleware

pub mod error_path;

pub use error_path::error_path_layer;
