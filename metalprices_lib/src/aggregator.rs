//! Per-metal resolution with static fallback, and concurrent resolution of
//! every supported metal.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;

use crate::convert::UnitConverter;
use crate::error::PriceError;
use crate::fallback::{FallbackRecord, FallbackTable};
use crate::metal::Metal;
use crate::price::{NormalizedPrice, RawQuote};
use crate::source::PriceSource;

/// Resolves metal prices from a [`PriceSource`], converting to INR per gram
/// and falling back to static data whenever the source fails.
///
/// Cloning is cheap; clones share the same source.
#[derive(Clone)]
pub struct PriceAggregator {
    source: Arc<dyn PriceSource>,
    converter: UnitConverter,
    fallback: FallbackTable,
}

impl PriceAggregator {
    pub fn new(source: Arc<dyn PriceSource>, converter: UnitConverter) -> Self {
        Self::with_fallback(source, converter, FallbackTable::default())
    }

    pub fn with_fallback(
        source: Arc<dyn PriceSource>,
        converter: UnitConverter,
        fallback: FallbackTable,
    ) -> Self {
        Self {
            source,
            converter,
            fallback,
        }
    }

    /// Resolve the price of one metal.
    ///
    /// Any source failure is absorbed and answered from the fallback table.
    /// Fails with `MetalNotFound` only when the fallback has no entry either,
    /// which for free-form input means the name is not a supported metal.
    pub async fn resolve(&self, metal: &str) -> Result<NormalizedPrice, PriceError> {
        match self.source.fetch(metal).await {
            Ok(raw) => match Metal::parse(metal) {
                Some(parsed) => Ok(self.normalize(parsed, &raw)),
                None => Err(PriceError::MetalNotFound(metal.to_string())),
            },
            Err(err) => {
                match &err {
                    PriceError::UnsupportedMetal(_) => {
                        tracing::debug!(metal = metal, "unsupported metal requested")
                    }
                    _ => tracing::info!(metal = metal, "serving fallback price: {}", err),
                }
                self.fallback
                    .lookup(metal)
                    .map(from_fallback)
                    .ok_or_else(|| PriceError::MetalNotFound(metal.to_string()))
            }
        }
    }

    /// Resolve every supported metal concurrently.
    ///
    /// Each metal runs in its own task so a slow upstream call never delays
    /// the others; the call returns once all four have finished. Individual
    /// failures are logged and dropped. `AllSourcesFailed` is returned only
    /// when nothing resolved. Output is in [`Metal::ALL`] order.
    pub async fn resolve_all(&self) -> Result<Vec<NormalizedPrice>, PriceError> {
        let mut join_set = JoinSet::new();
        for metal in Metal::ALL {
            let this = self.clone();
            join_set.spawn(async move { (metal, this.resolve(metal.as_str()).await) });
        }

        let mut prices = Vec::with_capacity(Metal::ALL.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((_, Ok(price))) => prices.push(price),
                Ok((metal, Err(e))) => {
                    tracing::warn!(metal = metal.as_str(), "dropping metal from batch: {}", e);
                }
                Err(e) => tracing::warn!("price task failed: {}", e),
            }
        }

        if prices.is_empty() {
            return Err(PriceError::AllSourcesFailed);
        }
        prices.sort_by_key(|p| p.metal);
        Ok(prices)
    }

    fn normalize(&self, metal: Metal, raw: &RawQuote) -> NormalizedPrice {
        let grams = self.converter.to_grams_inr(raw);
        NormalizedPrice {
            metal,
            price_per_gram_inr: grams.price_per_gram_inr,
            prev_close_price: grams.prev_close_price,
            open_price: grams.open_price,
            high_price: grams.high_price,
            low_price: grams.low_price,
            change_24h: raw.change,
            change_pct: raw.change_pct,
            observed_at: Utc::now(),
        }
    }
}

fn from_fallback(record: &FallbackRecord) -> NormalizedPrice {
    NormalizedPrice {
        metal: record.metal,
        price_per_gram_inr: record.price_per_gram_inr,
        prev_close_price: record.prev_close_price,
        open_price: record.open_price,
        high_price: record.high_price,
        low_price: record.low_price,
        change_24h: record.change_24h,
        change_pct: record.change_pct,
        observed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::time::Duration;

    /// Fails every fetch as if the upstream were down.
    struct DownSource;

    #[async_trait]
    impl PriceSource for DownSource {
        async fn fetch(&self, metal: &str) -> Result<RawQuote, PriceError> {
            let parsed: Metal = metal.parse()?;
            Err(PriceError::SourceUnavailable {
                metal: parsed.as_str().to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    /// Returns the same flat quote for every metal after an optional delay.
    struct FixedSource {
        price: f64,
        delay: Duration,
    }

    #[async_trait]
    impl PriceSource for FixedSource {
        async fn fetch(&self, metal: &str) -> Result<RawQuote, PriceError> {
            let _: Metal = metal.parse()?;
            tokio::time::sleep(self.delay).await;
            Ok(RawQuote {
                price_usd_per_oz: self.price,
                change: 10.0,
                change_pct: 0.5,
                prev_close: self.price,
                open: self.price,
                high: self.price,
                low: self.price,
            })
        }
    }

    /// Sleeps a per-metal delay, then fails.
    struct StaggeredFailingSource;

    #[async_trait]
    impl PriceSource for StaggeredFailingSource {
        async fn fetch(&self, metal: &str) -> Result<RawQuote, PriceError> {
            let parsed: Metal = metal.parse()?;
            let ms = match parsed {
                Metal::Gold => 400,
                Metal::Silver => 100,
                Metal::Platinum => 300,
                Metal::Palladium => 200,
            };
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Err(PriceError::SourceUnavailable {
                metal: parsed.as_str().to_string(),
                reason: "timeout".to_string(),
            })
        }
    }

    fn aggregator(source: impl PriceSource + 'static) -> PriceAggregator {
        PriceAggregator::new(Arc::new(source), UnitConverter::new(83.5))
    }

    fn fixed(price: f64) -> FixedSource {
        FixedSource {
            price,
            delay: Duration::ZERO,
        }
    }

    fn assert_positive(p: &NormalizedPrice) {
        for v in [
            p.price_per_gram_inr,
            p.prev_close_price,
            p.open_price,
            p.high_price,
            p.low_price,
        ] {
            assert!(v > 0.0, "{} has non-positive field {}", p.metal, v);
        }
    }

    #[tokio::test]
    async fn resolve_converts_live_quote() {
        let price = aggregator(fixed(2000.0)).resolve("gold").await.unwrap();
        assert_eq!(price.metal, Metal::Gold);
        assert!((price.price_per_gram_inr - 5369.17).abs() < 1e-9);
        assert_eq!(price.change_24h, 10.0);
        assert_eq!(price.change_pct, 0.5);
    }

    #[tokio::test]
    async fn resolve_accepts_any_case() {
        let price = aggregator(fixed(2000.0)).resolve("GoLd").await.unwrap();
        assert_eq!(price.metal, Metal::Gold);
    }

    #[tokio::test]
    async fn resolve_falls_back_when_source_down() {
        let agg = aggregator(DownSource);
        let price = agg.resolve("gold").await.unwrap();
        assert_eq!(price.price_per_gram_inr, 7200.0);
        assert_eq!(price.change_24h, 15.5);

        let price = agg.resolve("platinum").await.unwrap();
        assert_eq!(price.change_24h, -12.3);
    }

    #[tokio::test]
    async fn resolve_always_positive_for_supported_metals() {
        for agg in [aggregator(DownSource), aggregator(fixed(1.0))] {
            for metal in Metal::ALL {
                let price = agg.resolve(metal.as_str()).await.unwrap();
                assert_eq!(price.metal, metal);
                assert_positive(&price);
            }
        }
    }

    #[tokio::test]
    async fn resolve_unknown_metal_not_found() {
        for agg in [aggregator(DownSource), aggregator(fixed(2000.0))] {
            let err = agg.resolve("unknownmetal").await.unwrap_err();
            assert_eq!(err, PriceError::MetalNotFound("unknownmetal".into()));
        }
    }

    #[tokio::test]
    async fn resolve_stamps_resolution_time() {
        let before = Utc::now();
        let price = aggregator(DownSource).resolve("silver").await.unwrap();
        let after = Utc::now();
        assert!(price.observed_at >= before && price.observed_at <= after);
    }

    #[tokio::test]
    async fn resolve_all_returns_four_metals() {
        let prices = aggregator(fixed(1500.0)).resolve_all().await.unwrap();
        let names: Vec<_> = prices.iter().map(|p| p.metal.to_string()).collect();
        assert_eq!(names, vec!["Gold", "Silver", "Platinum", "Palladium"]);
    }

    #[tokio::test]
    async fn resolve_all_uses_fallback_when_every_fetch_fails() {
        let prices = aggregator(DownSource).resolve_all().await.unwrap();
        assert_eq!(prices.len(), 4);
        let metals: HashSet<_> = prices.iter().map(|p| p.metal).collect();
        assert_eq!(metals, Metal::ALL.into_iter().collect::<HashSet<_>>());
        prices.iter().for_each(assert_positive);
    }

    #[tokio::test]
    async fn resolve_all_fails_only_when_nothing_resolves() {
        static NO_RECORDS: [FallbackRecord; 0] = [];
        let agg = PriceAggregator::with_fallback(
            Arc::new(DownSource),
            UnitConverter::default(),
            FallbackTable::with_records(&NO_RECORDS),
        );
        assert_eq!(agg.resolve_all().await.unwrap_err(), PriceError::AllSourcesFailed);
    }

    #[tokio::test]
    async fn resolve_all_keeps_partial_results() {
        static GOLD_ONLY: [FallbackRecord; 1] = [FallbackRecord {
            metal: Metal::Gold,
            price_per_gram_inr: 1.0,
            change_24h: 0.0,
            change_pct: 0.0,
            prev_close_price: 1.0,
            open_price: 1.0,
            high_price: 1.0,
            low_price: 1.0,
        }];
        let agg = PriceAggregator::with_fallback(
            Arc::new(DownSource),
            UnitConverter::default(),
            FallbackTable::with_records(&GOLD_ONLY),
        );
        let prices = agg.resolve_all().await.unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].metal, Metal::Gold);
    }

    #[tokio::test(start_paused = true)]
    async fn resolve_all_runs_concurrently() {
        let agg = aggregator(FixedSource {
            price: 2000.0,
            delay: Duration::from_millis(250),
        });
        let start = tokio::time::Instant::now();
        let prices = agg.resolve_all().await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(prices.len(), 4);
        assert!(elapsed >= Duration::from_millis(250));
        assert!(elapsed < Duration::from_millis(500), "took {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn resolve_all_bounded_by_slowest_call() {
        let start = tokio::time::Instant::now();
        let prices = aggregator(StaggeredFailingSource).resolve_all().await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(prices.len(), 4);
        // Slowest metal sleeps 400ms; sequential would be 1000ms.
        assert!(elapsed >= Duration::from_millis(400));
        assert!(elapsed < Duration::from_millis(600), "took {:?}", elapsed);
        assert_eq!(prices[0].metal, Metal::Gold);
    }
}
