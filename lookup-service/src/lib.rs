pub mod classifier;
pub mod config;
pub mod handlers;
pub mod services;
pub mod startup;
pub mod store;

pub use startup::{build_router, AppState, Application};
