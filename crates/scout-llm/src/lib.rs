pub mod gemini;
pub mod mock;
pub mod models;

pub use gemini::GeminiDelegate;
pub use mock::{MockDelegate, MockReply};
pub use models::{all_models, default_model, find_model, GeminiModelInfo};
