//! Response types for the GoldAPI.io spot endpoint.

use serde::Deserialize;

/// A spot quote for one metal/currency pair, priced per troy ounce.
///
/// GoldAPI omits fields it has no data for (outside trading hours the
/// OHLC fields are often absent), so everything except the symbols is
/// optional. Unknown fields such as `timestamp` or `ask` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpotPrice {
    #[serde(default)]
    pub metal: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Absolute change since previous close.
    #[serde(default, rename = "ch")]
    pub change: Option<f64>,
    /// Percentage change since previous close.
    #[serde(default, rename = "chp")]
    pub change_pct: Option<f64>,
    #[serde(default)]
    pub prev_close_price: Option<f64>,
    #[serde(default)]
    pub open_price: Option<f64>,
    #[serde(default)]
    pub high_price: Option<f64>,
    #[serde(default)]
    pub low_price: Option<f64>,
}
