//! Trait and types for fare data providers.

use anyhow::Result;

/// One raw route/date/price observation as delivered by a provider, before
/// normalization.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub route: String,
    pub date: String,
    pub price: f64,
}

/// Abstraction over a fare data provider.
///
/// The bundled [`SampleSource`] serves a fixed batch; a live fetch can be
/// swapped in without touching anything downstream of normalization.
#[async_trait::async_trait]
pub trait FareSource: Send + Sync {
    /// Returns one batch of raw fare observations.
    async fn fetch(&self) -> Result<Vec<RawRecord>>;
}

/// Fixed in-memory sample batch standing in for a live fare feed.
///
/// Real booking data is paywalled, so the demo dataset covers ten Australian
/// domestic routes over five days in October 2023.
pub struct SampleSource;

const SAMPLE_ROWS: &[(&str, &str, f64)] = &[
    ("Sydney (SYD) - Brisbane (BNE)", "2023-10-01", 120.0),
    ("Melbourne (MEL) - Sydney (SYD)", "2023-10-02", 110.0),
    ("Brisbane (BNE) - Perth (PER)", "2023-10-03", 250.0),
    ("Sydney (SYD) - Melbourne (MEL)", "2023-10-01", 115.0),
    ("Adelaide (ADL) - Sydney (SYD)", "2023-10-02", 180.0),
    ("Gold Coast (OOL) - Melbourne (MEL)", "2023-10-03", 220.0),
    ("Perth (PER) - Brisbane (BNE)", "2023-10-04", 260.0),
    ("Sydney (SYD) - Gold Coast (OOL)", "2023-10-05", 130.0),
    ("Melbourne (MEL) - Perth (PER)", "2023-10-01", 240.0),
    ("Brisbane (BNE) - Adelaide (ADL)", "2023-10-04", 230.0),
];

#[async_trait::async_trait]
impl FareSource for SampleSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>> {
        Ok(SAMPLE_ROWS
            .iter()
            .map(|&(route, date, price)| RawRecord {
                route: route.to_string(),
                date: date.to_string(),
                price,
            })
            .collect())
    }
}
