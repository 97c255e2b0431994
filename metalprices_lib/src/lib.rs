//! Library layer for the metal prices service: spot price retrieval,
//! INR-per-gram normalization, static fallback data, and concurrent
//! aggregation across the supported metals.
//!
//! Also carries the configuration loader, input validation, and the
//! SQLite-backed status-check store used by the HTTP server.

pub mod aggregator;
pub mod config;
pub mod convert;
pub mod error;
pub mod fallback;
pub mod metal;
pub mod price;
pub mod source;
pub mod status;
pub mod validation;

pub use goldapi_client;

pub use aggregator::PriceAggregator;
pub use config::{Config, ConfigError};
pub use convert::UnitConverter;
pub use error::PriceError;
pub use fallback::{FallbackRecord, FallbackTable};
pub use metal::Metal;
pub use price::{NormalizedPrice, RawQuote};
pub use source::{GoldApiSource, PriceSource};
pub use status::{StatusCheck, StatusError, StatusStore};
