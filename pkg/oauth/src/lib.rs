mod error;
mod oauth;
pub use error::Error;
pub use oauth::OAuth;
pub use oauth::check_response;
