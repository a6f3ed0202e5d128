pub mod capability;
pub mod errors;
pub mod history;
pub mod ids;
pub mod query;

pub use capability::{Delegate, Search, Snippet};
pub use errors::{DelegateError, SearchError};
pub use history::{HistoryEntry, Speaker};
pub use ids::SessionId;
pub use query::{Query, QueryError};
