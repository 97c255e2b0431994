//! Upstream spot price sources.

use async_trait::async_trait;
use goldapi_client::{Client, SpotPrice};

use crate::error::PriceError;
use crate::metal::Metal;
use crate::price::RawQuote;

/// Quote currency of every upstream pair.
pub const QUOTE_CURRENCY: &str = "USD";

/// A single-shot fetch of one metal's USD/oz spot quote.
///
/// Implementations return `UnsupportedMetal` for names outside the
/// supported set without doing any I/O, and `SourceUnavailable` for every
/// transport, status, or parse failure. No retries.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, metal: &str) -> Result<RawQuote, PriceError>;
}

/// [`PriceSource`] backed by the GoldAPI.io spot endpoint.
#[derive(Clone)]
pub struct GoldApiSource {
    client: Client,
}

impl GoldApiSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceSource for GoldApiSource {
    async fn fetch(&self, metal: &str) -> Result<RawQuote, PriceError> {
        let parsed: Metal = metal.parse()?;

        let spot = self
            .client
            .get_spot_price(parsed.symbol(), QUOTE_CURRENCY)
            .await
            .map_err(|e| {
                let reason = match &e {
                    goldapi_client::Error::HttpStatus { body, .. } if !body.is_empty() => {
                        format!("{}: {}", e, body)
                    }
                    _ => e.to_string(),
                };
                tracing::warn!(metal = parsed.as_str(), "upstream fetch failed: {}", reason);
                PriceError::SourceUnavailable {
                    metal: parsed.as_str().to_string(),
                    reason,
                }
            })?;

        raw_quote_from_spot(&spot).ok_or_else(|| {
            tracing::warn!(
                metal = parsed.as_str(),
                "upstream quote has no usable price: {:?}",
                spot.price
            );
            PriceError::SourceUnavailable {
                metal: parsed.as_str().to_string(),
                reason: "missing or non-positive price".to_string(),
            }
        })
    }
}

/// Build a [`RawQuote`] from the provider's fields.
///
/// Returns `None` when `price` is absent or not positive. Missing or
/// non-positive OHLC fields fall back to `price`; missing change fields
/// become zero.
pub fn raw_quote_from_spot(spot: &SpotPrice) -> Option<RawQuote> {
    let price = spot.price.filter(|p| p.is_finite() && *p > 0.0)?;
    let or_price = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0).unwrap_or(price);

    Some(RawQuote {
        price_usd_per_oz: price,
        change: spot.change.unwrap_or(0.0),
        change_pct: spot.change_pct.unwrap_or(0.0),
        prev_close: or_price(spot.prev_close_price),
        open: or_price(spot.open_price),
        high: or_price(spot.high_price),
        low: or_price(spot.low_price),
    })
}
