// Slash / prefix commands
pub mod backup;
pub mod dashboard;
pub mod flight;
pub mod help;
pub mod history;
pub mod optimizer;
pub mod target;
