// Utility functions module
pub mod airports;
pub mod config;
pub mod fares;
pub mod formatters;
pub mod mileage;
pub mod pp;
pub mod visualizations;
