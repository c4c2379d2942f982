//! Per-request orchestration of the reporting pipeline:
//! source → normalize → filter → aggregate → {summarize, charts}.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate;
use crate::charts::{self, ChartSpec};
use crate::error::PipelineError;
use crate::filter::{self, FilterParams};
use crate::normalize::{self, Record};
use crate::source::FareSource;
use crate::summarize::Summarizer;

/// Number of top routes and top dates embedded in the summarizer prompt.
const PROMPT_TOP_N: usize = 3;

/// Raw filter values as submitted by the form or CLI. Kept as strings so
/// they can be echoed back for re-population regardless of validity.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

/// Everything the presentation layer needs for one request.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// User-facing error message; when set, the other payload fields are empty.
    pub error: Option<String>,
    pub insights: String,
    pub routes_chart: Option<ChartSpec>,
    pub price_chart: Option<ChartSpec>,
    /// Echo of the submitted filter values.
    pub filters: ReportQuery,
}

/// Runs the full pipeline for one request.
///
/// Never returns an error: pipeline failures become the `error` field of the
/// [`Report`] so the serving layer has nothing to handle.
#[tracing::instrument(skip_all, fields(
    start_date = query.start_date.as_deref().unwrap_or(""),
    end_date = query.end_date.as_deref().unwrap_or(""),
    origin = query.origin.as_deref().unwrap_or(""),
    destination = query.destination.as_deref().unwrap_or(""),
))]
pub async fn run_report(
    source: &dyn FareSource,
    summarizer: &Summarizer,
    query: &ReportQuery,
) -> Report {
    match run_pipeline(source, summarizer, query).await {
        Ok(report) => report,
        Err(e) => {
            info!(error = %e, "Report request aborted");
            Report {
                error: Some(e.to_string()),
                filters: query.clone(),
                ..Default::default()
            }
        }
    }
}

async fn run_pipeline(
    source: &dyn FareSource,
    summarizer: &Summarizer,
    query: &ReportQuery,
) -> Result<Report, PipelineError> {
    let filtered = filtered_records(source, query).await?;
    if filtered.is_empty() {
        return Err(PipelineError::EmptyResult);
    }

    let routes = aggregate::by_route(&filtered);
    let dates = aggregate::by_date(&filtered);
    let high_demand = aggregate::top_demand_dates(&dates, PROMPT_TOP_N);
    let top_routes = &routes[..routes.len().min(PROMPT_TOP_N)];

    let insights = summarizer.summarize(top_routes, &dates, &high_demand).await;

    info!(
        rows = filtered.len(),
        route_groups = routes.len(),
        date_groups = dates.len(),
        "Report built"
    );

    Ok(Report {
        error: None,
        insights,
        routes_chart: Some(charts::demand_by_route(&routes)),
        price_chart: Some(charts::price_by_date(&dates)),
        filters: query.clone(),
    })
}

/// Fetches, normalizes, and filters one batch. Shared by the web report and
/// the CLI CSV export.
pub async fn filtered_records(
    source: &dyn FareSource,
    query: &ReportQuery,
) -> Result<Vec<Record>, PipelineError> {
    let params = FilterParams::parse(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        query.origin.as_deref(),
        query.destination.as_deref(),
    )?;

    let raw = source
        .fetch()
        .await
        .map_err(|e| PipelineError::SourceFetch(e.to_string()))?;

    let records = normalize::normalize(raw)?;
    Ok(filter::apply(&records, &params))
}
