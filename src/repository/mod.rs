//! Data access layer
//!
//! Plain async functions over sea-orm entities, one module per table.

pub mod department;
pub mod staff;
