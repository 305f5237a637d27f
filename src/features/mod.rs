pub mod backup;
pub mod logbook;
pub mod mile_optimizer;
