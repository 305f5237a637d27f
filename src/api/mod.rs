// Persistence collaborators
pub mod store;
