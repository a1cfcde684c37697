pub mod claims;
pub mod config;
pub mod discovery;
pub mod error;
mod fixture;
mod get_authorize_url;
mod get_config_for;
mod get_jwks;
mod get_tokens;
mod get_user_info;
pub mod handler;
pub mod keys;
pub mod router;
pub mod token;
pub mod upstream;

pub use error::Error;

pub const SERVICE_NAME: &str = "openid";
