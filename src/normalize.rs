//! Normalization of raw fare observations.
//!
//! Extracts origin/destination names from the route display string, parses
//! dates, and derives the synthetic demand estimate from price.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::error::PipelineError;
use crate::source::RawRecord;

/// A normalized route/date/price observation.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub route: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: NaiveDate,
    pub price: f64,
    pub demand_estimate: i64,
}

/// Extracts the origin and destination display names from a route string of
/// the form `"<Name> (<CODE>) - <Name> (<CODE>)"`, where `<Name>` is letters
/// and spaces and `<CODE>` is exactly three alphanumeric characters.
///
/// Returns `None` on any mismatch; downstream filters simply exclude such
/// records when a substring filter is applied.
pub fn parse_route(route: &str) -> Option<(String, String)> {
    let re = Regex::new(r"^([A-Za-z ]+) \((\w{3})\) - ([A-Za-z ]+) \((\w{3})\)$").ok()?;
    let caps = re.captures(route)?;
    Some((caps[1].trim().to_string(), caps[3].trim().to_string()))
}

/// Computes the demand estimate for a price given the batch maximum.
///
/// The formula `round((max_price - price) / max_price * 100) + 20` is a
/// simulated stand-in for real demand data: the cheapest fares score highest,
/// the most expensive fare in a batch always scores exactly 20.
fn demand_estimate(price: f64, max_price: f64) -> i64 {
    if max_price <= 0.0 {
        return 20;
    }
    ((max_price - price) / max_price * 100.0).round() as i64 + 20
}

/// Normalizes a raw batch into [`Record`]s.
///
/// An empty batch yields an empty output. A malformed date string in the
/// batch is a [`PipelineError::DateParse`] surfaced to the user as a
/// validation message.
pub fn normalize(raw: Vec<RawRecord>) -> Result<Vec<Record>, PipelineError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let max_price = raw.iter().map(|r| r.price).fold(f64::MIN, f64::max);

    raw.into_iter()
        .map(|r| {
            let date = NaiveDate::parse_from_str(&r.date, "%Y-%m-%d")
                .map_err(|_| PipelineError::date_parse("source date"))?;
            let (origin, destination) = match parse_route(&r.route) {
                Some((o, d)) => (Some(o), Some(d)),
                None => (None, None),
            };

            Ok(Record {
                origin,
                destination,
                date,
                demand_estimate: demand_estimate(r.price, max_price),
                price: r.price,
                route: r.route,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(route: &str, date: &str, price: f64) -> RawRecord {
        RawRecord {
            route: route.to_string(),
            date: date.to_string(),
            price,
        }
    }

    #[test]
    fn test_parse_route_well_formed() {
        let (origin, destination) = parse_route("City A (AAA) - City B (BBB)").unwrap();
        assert_eq!(origin, "City A");
        assert_eq!(destination, "City B");
    }

    #[test]
    fn test_parse_route_missing_parens() {
        assert!(parse_route("Sydney SYD - Brisbane BNE").is_none());
    }

    #[test]
    fn test_parse_route_wrong_code_length() {
        assert!(parse_route("City A (AAAA) - City B (BBB)").is_none());
        assert!(parse_route("City A (AA) - City B (BBB)").is_none());
    }

    #[test]
    fn test_demand_at_max_price_is_twenty() {
        assert_eq!(demand_estimate(260.0, 260.0), 20);
    }

    #[test]
    fn test_demand_at_zero_price_is_120() {
        assert_eq!(demand_estimate(0.0, 260.0), 120);
    }

    #[test]
    fn test_demand_monotonically_decreasing_in_price() {
        let cheap = demand_estimate(110.0, 260.0);
        let mid = demand_estimate(180.0, 260.0);
        let expensive = demand_estimate(250.0, 260.0);
        assert!(cheap > mid);
        assert!(mid > expensive);
    }

    #[test]
    fn test_normalize_empty_batch_is_noop() {
        let out = normalize(vec![]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_normalize_sets_parsed_fields() {
        let out = normalize(vec![
            raw("Sydney (SYD) - Brisbane (BNE)", "2023-10-01", 120.0),
            raw("not a route", "2023-10-02", 240.0),
        ])
        .unwrap();

        assert_eq!(out[0].origin.as_deref(), Some("Sydney"));
        assert_eq!(out[0].destination.as_deref(), Some("Brisbane"));
        assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());

        assert!(out[1].origin.is_none());
        assert!(out[1].destination.is_none());

        // 240 is the batch max, so it pins the baseline.
        assert_eq!(out[1].demand_estimate, 20);
        assert_eq!(out[0].demand_estimate, 70);
    }

    #[test]
    fn test_normalize_bad_date_is_validation_error() {
        let err = normalize(vec![raw("Sydney (SYD) - Brisbane (BNE)", "10/01/2023", 120.0)])
            .unwrap_err();
        assert!(matches!(err, PipelineError::DateParse { .. }));
    }
}
