//! treatment-core
//!
//! Pure domain types shared across the Treatment AI backend.
//! No database or HTTP dependency; this is the vocabulary of the system.

pub mod error;
pub mod models;
