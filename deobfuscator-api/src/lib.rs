pub mod api;
pub mod errors;
pub mod models;
pub mod state;
