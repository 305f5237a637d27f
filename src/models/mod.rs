// Data models
pub mod flight_log;
pub mod stats;
