//! Domain models for the Plant Disease Advisory Platform

mod advice;
mod detection;
mod history;
mod weather;

pub use advice::*;
pub use detection::*;
pub use history::*;
pub use weather::*;
