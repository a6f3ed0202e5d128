pub mod controller;
pub mod handlers;
pub mod server;

pub use controller::{ChatController, SubmitOutcome};
pub use server::{start, AppState, ServerConfig, ServerHandle};
