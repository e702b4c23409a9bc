pub mod config;
pub mod db;
pub mod error;
pub mod mailer;
pub mod server;
pub mod slug;

pub use error::ApiError;
pub use server::router::{AppState, api_router};
