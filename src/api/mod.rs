mod client;
mod error;
mod types;

pub use client::Client;
pub use error::ApiError;
pub use types::Photo;
