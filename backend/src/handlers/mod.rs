//! HTTP handlers for the Plant Disease Advisory Platform

pub mod health;
pub mod history;
pub mod predict;

pub use health::*;
pub use history::*;
pub use predict::*;
