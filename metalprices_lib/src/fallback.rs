//! Static per-metal prices served when the upstream source is unavailable.
//!
//! Values are already in INR per gram, so no conversion happens at
//! fallback time.

use crate::metal::Metal;

/// A fixed price snapshot for one metal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackRecord {
    pub metal: Metal,
    pub price_per_gram_inr: f64,
    pub change_24h: f64,
    pub change_pct: f64,
    pub prev_close_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
}

const FALLBACK_RECORDS: [FallbackRecord; 4] = [
    FallbackRecord {
        metal: Metal::Gold,
        price_per_gram_inr: 7200.0,
        change_24h: 15.5,
        change_pct: 0.58,
        prev_close_price: 7184.5,
        open_price: 7190.0,
        high_price: 7220.0,
        low_price: 7180.0,
    },
    FallbackRecord {
        metal: Metal::Silver,
        price_per_gram_inr: 85.5,
        change_24h: 0.8,
        change_pct: 2.63,
        prev_close_price: 84.7,
        open_price: 85.0,
        high_price: 86.2,
        low_price: 84.5,
    },
    FallbackRecord {
        metal: Metal::Platinum,
        price_per_gram_inr: 2680.0,
        change_24h: -12.3,
        change_pct: -0.46,
        prev_close_price: 2692.3,
        open_price: 2685.0,
        high_price: 2695.0,
        low_price: 2675.0,
    },
    FallbackRecord {
        metal: Metal::Palladium,
        price_per_gram_inr: 2855.0,
        change_24h: 22.1,
        change_pct: 0.78,
        prev_close_price: 2832.9,
        open_price: 2840.0,
        high_price: 2860.0,
        low_price: 2835.0,
    },
];

/// Read-only lookup over the built-in fallback records.
#[derive(Debug, Clone, Copy)]
pub struct FallbackTable {
    records: &'static [FallbackRecord],
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self {
            records: &FALLBACK_RECORDS,
        }
    }
}

impl FallbackTable {
    /// A table over caller-provided records. Metals absent from `records`
    /// have no fallback.
    pub fn with_records(records: &'static [FallbackRecord]) -> Self {
        Self { records }
    }

    /// Look up a record by metal name (case-insensitive). `None` for
    /// anything outside the supported set.
    pub fn lookup(&self, metal: &str) -> Option<&'static FallbackRecord> {
        let metal = Metal::parse(metal)?;
        self.get(metal)
    }

    pub fn get(&self, metal: Metal) -> Option<&'static FallbackRecord> {
        self.records.iter().find(|r| r.metal == metal)
    }
}
