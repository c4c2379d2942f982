//! Grouped mean reductions over a filtered batch.
//!
//! Two independent groupings feed the summarizer prompt and the charts:
//! per-route mean demand/price ordered by demand, and per-date mean price
//! ordered by date.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::normalize::Record;

/// Mean demand and price for the observations sharing one route string.
#[derive(Debug, Clone, Serialize)]
pub struct RouteAggregate {
    pub route: String,
    pub mean_demand: f64,
    pub mean_price: f64,
    pub count: usize,
}

/// Mean price and demand for the observations sharing one date.
#[derive(Debug, Clone, Serialize)]
pub struct DateAggregate {
    pub date: NaiveDate,
    pub mean_price: f64,
    pub mean_demand: f64,
    pub count: usize,
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Groups records by exact route string and averages demand and price per
/// group, sorted descending by mean demand. The sort is stable, so routes
/// tying on demand keep their first-encounter order.
pub fn by_route(records: &[Record]) -> Vec<RouteAggregate> {
    let mut order: Vec<&str> = Vec::new();
    let mut series: HashMap<&str, (Vec<f64>, Vec<f64>)> = HashMap::new();

    for r in records {
        let entry = series.entry(r.route.as_str()).or_insert_with(|| {
            order.push(r.route.as_str());
            (Vec::new(), Vec::new())
        });
        entry.0.push(r.demand_estimate as f64);
        entry.1.push(r.price);
    }

    let mut groups: Vec<RouteAggregate> = order
        .iter()
        .map(|route| {
            let (demands, prices) = &series[route];
            RouteAggregate {
                route: route.to_string(),
                mean_demand: mean(demands),
                mean_price: mean(prices),
                count: demands.len(),
            }
        })
        .collect();

    groups.sort_by(|a, b| b.mean_demand.total_cmp(&a.mean_demand));
    groups
}

/// Groups records by date and averages price and demand per group, sorted
/// ascending by date.
pub fn by_date(records: &[Record]) -> Vec<DateAggregate> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut series: HashMap<NaiveDate, (Vec<f64>, Vec<f64>)> = HashMap::new();

    for r in records {
        let entry = series.entry(r.date).or_insert_with(|| {
            order.push(r.date);
            (Vec::new(), Vec::new())
        });
        entry.0.push(r.price);
        entry.1.push(r.demand_estimate as f64);
    }

    let mut groups: Vec<DateAggregate> = order
        .iter()
        .map(|date| {
            let (prices, demands) = &series[date];
            DateAggregate {
                date: *date,
                mean_price: mean(prices),
                mean_demand: mean(demands),
                count: prices.len(),
            }
        })
        .collect();

    groups.sort_by_key(|g| g.date);
    groups
}

/// Returns the `n` dates with the highest mean demand, stable on ties.
pub fn top_demand_dates(by_date: &[DateAggregate], n: usize) -> Vec<DateAggregate> {
    let mut dates = by_date.to_vec();
    dates.sort_by(|a, b| b.mean_demand.total_cmp(&a.mean_demand));
    dates.truncate(n);
    dates
}
