//! Entity module - SeaORM entity definitions
//!
//! `department` 1 -- * `staff`

pub mod department;
pub mod staff;
