//! Minimal HTTP client for the GoldAPI.io spot price API.

mod client;
mod errors;
pub mod types;

pub use self::client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::types::SpotPrice;
