mod api_key;
mod auth;
mod error_handler;

pub use api_key::require_api_key;
pub use auth::auth_middleware;
pub use error_handler::log_errors;
