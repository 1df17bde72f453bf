//! Business logic services for the Plant Disease Advisory Platform

pub mod advice;
pub mod history;
pub mod pipeline;
pub mod weather;

pub use advice::AdviceService;
pub use history::HistoryService;
pub use pipeline::DetectionPipeline;
pub use weather::WeatherService;
