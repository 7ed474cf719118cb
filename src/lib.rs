pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
