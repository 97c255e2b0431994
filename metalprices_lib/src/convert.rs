//! USD-per-troy-ounce to INR-per-gram conversion.
//!
//! Uses a fixed exchange rate supplied by configuration. The rate is never
//! fetched live; conversions are approximate by design of the service.

use crate::price::RawQuote;

/// Grams per troy ounce, as used for quoting.
pub const TROY_OUNCE_GRAMS: f64 = 31.1035;

/// Default USD to INR rate when none is configured.
pub const DEFAULT_USD_TO_INR_RATE: f64 = 83.5;

/// The converted price fields of a quote, each rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GramPrices {
    pub price_per_gram_inr: f64,
    pub prev_close_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
}

/// Converts troy-ounce USD quotes into INR per gram at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    usd_to_inr_rate: f64,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(DEFAULT_USD_TO_INR_RATE)
    }
}

impl UnitConverter {
    pub fn new(usd_to_inr_rate: f64) -> Self {
        Self { usd_to_inr_rate }
    }

    pub fn rate(&self) -> f64 {
        self.usd_to_inr_rate
    }

    /// Convert a single USD/oz value to INR/g, rounded to 2 decimals.
    pub fn usd_per_oz_to_inr_per_gram(&self, usd_per_oz: f64) -> f64 {
        round2((usd_per_oz / TROY_OUNCE_GRAMS) * self.usd_to_inr_rate)
    }

    /// Convert the price and OHLC fields of a quote. The change fields are
    /// not part of the output; they pass through unconverted.
    pub fn to_grams_inr(&self, raw: &RawQuote) -> GramPrices {
        GramPrices {
            price_per_gram_inr: self.usd_per_oz_to_inr_per_gram(raw.price_usd_per_oz),
            prev_close_price: self.usd_per_oz_to_inr_per_gram(raw.prev_close),
            open_price: self.usd_per_oz_to_inr_per_gram(raw.open),
            high_price: self.usd_per_oz_to_inr_per_gram(raw.high),
            low_price: self.usd_per_oz_to_inr_per_gram(raw.low),
        }
    }
}

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
