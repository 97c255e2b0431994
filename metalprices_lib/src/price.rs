//! Price records: the transient upstream quote and the normalized
//! INR-per-gram record returned to callers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::metal::Metal;

/// Format of the human-readable `current_time` wire field.
pub const CURRENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An upstream quote in USD per troy ounce.
///
/// Only lives for the duration of one resolution; every OHLC field is
/// already defaulted to the quoted price when the provider omitted it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawQuote {
    pub price_usd_per_oz: f64,
    pub change: f64,
    pub change_pct: f64,
    pub prev_close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
}

/// A metal price in INR per gram, stamped with the time it was resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "MetalPriceResponse")]
pub struct NormalizedPrice {
    pub metal: Metal,
    pub price_per_gram_inr: f64,
    pub prev_close_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub change_24h: f64,
    pub change_pct: f64,
    pub observed_at: DateTime<Utc>,
}

impl NormalizedPrice {
    /// `observed_at` as `YYYY-MM-DD HH:MM:SS`.
    pub fn current_time(&self) -> String {
        self.observed_at.format(CURRENT_TIME_FORMAT).to_string()
    }

    /// `observed_at` as RFC 3339 with microsecond precision.
    pub fn timestamp(&self) -> String {
        self.observed_at
            .to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// JSON shape of a [`NormalizedPrice`]. Field names are a stable contract
/// with existing consumers; `current_time` and `timestamp` carry the same
/// instant in two formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalPriceResponse {
    pub metal: String,
    pub price_per_gram_inr: f64,
    pub current_time: String,
    pub prev_close_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub change_24h: f64,
    pub change_pct: f64,
    pub timestamp: String,
}

impl From<NormalizedPrice> for MetalPriceResponse {
    fn from(p: NormalizedPrice) -> Self {
        Self {
            metal: p.metal.display_name().to_string(),
            price_per_gram_inr: p.price_per_gram_inr,
            current_time: p.current_time(),
            prev_close_price: p.prev_close_price,
            open_price: p.open_price,
            high_price: p.high_price,
            low_price: p.low_price,
            change_24h: p.change_24h,
            change_pct: p.change_pct,
            timestamp: p.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> NormalizedPrice {
        NormalizedPrice {
            metal: Metal::Gold,
            price_per_gram_inr: 5369.17,
            prev_close_price: 5342.33,
            open_price: 5355.75,
            high_price: 5396.69,
            low_price: 5328.91,
            change_24h: 10.0,
            change_pct: 0.5,
            observed_at: Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 5).unwrap(),
        }
    }

    #[test]
    fn serializes_wire_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "change_24h",
                "change_pct",
                "current_time",
                "high_price",
                "low_price",
                "metal",
                "open_price",
                "prev_close_price",
                "price_per_gram_inr",
                "timestamp",
            ]
        );
        assert_eq!(value["metal"], "Gold");
        assert_eq!(value["price_per_gram_inr"], 5369.17);
    }

    #[test]
    fn both_time_fields_share_one_instant() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["current_time"], "2025-01-15 09:30:05");
        assert_eq!(value["timestamp"], "2025-01-15T09:30:05.000000Z");

        let parsed = DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), sample().observed_at);
    }

    #[test]
    fn response_deserializes_back() {
        let json = serde_json::to_string(&sample()).unwrap();
        let resp: MetalPriceResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp.metal, "Gold");
        assert_eq!(resp.low_price, 5328.91);
    }
}
