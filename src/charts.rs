//! Chart descriptors for client-side rendering.
//!
//! Descriptors are plain serializable structures; the web layer embeds them
//! as JSON and a small script draws them in the browser.

use serde::Serialize;

use crate::aggregate::{DateAggregate, RouteAggregate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// One (label, value) pair on a chart axis.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Everything a client needs to render one chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub points: Vec<ChartPoint>,
}

/// Bar chart of mean demand per route, in the descending-demand order the
/// aggregator produced.
pub fn demand_by_route(routes: &[RouteAggregate]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Average Demand by Route".to_string(),
        x_title: "Route".to_string(),
        y_title: "Average Demand Estimate".to_string(),
        points: routes
            .iter()
            .map(|r| ChartPoint {
                label: r.route.clone(),
                value: r.mean_demand,
            })
            .collect(),
    }
}

/// Line chart of mean price per date, in the ascending-date order the
/// aggregator produced.
pub fn price_by_date(dates: &[DateAggregate]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        title: "Average Price Trend Over Dates".to_string(),
        x_title: "Date".to_string(),
        y_title: "Average Price (AUD)".to_string(),
        points: dates
            .iter()
            .map(|d| ChartPoint {
                label: d.date.format("%Y-%m-%d").to_string(),
                value: d.mean_price,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_demand_chart_preserves_route_order() {
        let routes = vec![
            RouteAggregate {
                route: "A - B".into(),
                mean_demand: 90.0,
                mean_price: 110.0,
                count: 2,
            },
            RouteAggregate {
                route: "C - D".into(),
                mean_demand: 30.0,
                mean_price: 250.0,
                count: 1,
            },
        ];

        let spec = demand_by_route(&routes);
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.points.len(), 2);
        assert_eq!(spec.points[0].label, "A - B");
        assert_eq!(spec.points[0].value, 90.0);
    }

    #[test]
    fn test_price_chart_labels_are_iso_dates() {
        let dates = vec![DateAggregate {
            date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            mean_price: 158.33,
            mean_demand: 61.0,
            count: 3,
        }];

        let spec = price_by_date(&dates);
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.points[0].label, "2023-10-01");
        assert_eq!(spec.points[0].value, 158.33);
    }

    #[test]
    fn test_chart_spec_serializes_kind_lowercase() {
        let spec = demand_by_route(&[]);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["points"].as_array().unwrap().len(), 0);
    }
}
