//! Error taxonomy for price resolution.

use thiserror::Error;

/// Errors produced while resolving metal prices.
///
/// `UnsupportedMetal` and `SourceUnavailable` come out of a [`PriceSource`]
/// and are absorbed by the aggregator, which falls back to static data.
/// Only `MetalNotFound` and `AllSourcesFailed` ever reach a caller of
/// [`PriceAggregator`].
///
/// [`PriceSource`]: crate::source::PriceSource
/// [`PriceAggregator`]: crate::aggregator::PriceAggregator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("Unsupported metal: {0}")]
    UnsupportedMetal(String),
    #[error("Price source unavailable for {metal}: {reason}")]
    SourceUnavailable { metal: String, reason: String },
    #[error("Metal {0} not found")]
    MetalNotFound(String),
    #[error("Could not fetch any metal prices")]
    AllSourcesFailed,
}

impl PriceError {
    /// True for upstream failures that may clear on a later request.
    /// Caller input errors such as `UnsupportedMetal` never do.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}
