//! Shared types and domain logic for the Plant Disease Advisory Platform
//!
//! This crate contains the pure parts of the system — weather
//! classification, detection-label normalization, history tallying — and the
//! types exchanged between the backend services.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
