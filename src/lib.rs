pub mod api;
pub mod config;
pub mod error;
pub mod messaging;
pub mod model;
pub mod models;

// Convenient re-exports (so call sites can do `restack::Model`, etc.)
pub use api::{AccountApi, ApiError, Gw2Client};
pub use error::{AppError, AppResult};
pub use messaging::{Listener, Messaging};
pub use model::Model;
