pub mod client;
pub mod models;
pub mod source;

pub use self::client::{Api, ApiError};
