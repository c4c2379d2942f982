//! Axum front end for the reporting pipeline.
//!
//! One form page: `GET /` renders the empty filter form, `POST /` runs the
//! pipeline and renders insights plus charts. Chart specs are embedded as
//! JSON and drawn client-side; styling is not load-bearing.

use axum::{
    extract::State,
    response::Html,
    routing::get,
    Form, Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::report::{run_report, Report, ReportQuery};
use crate::source::FareSource;
use crate::summarize::Summarizer;

/// Shared application state. Each request builds its own table from the
/// source, so nothing here needs locking.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn FareSource>,
    pub summarizer: Arc<Summarizer>,
}

/// Builds the application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Initial page: form only, no pipeline run.
async fn index() -> Html<String> {
    Html(render_page(&Report::default()))
}

async fn submit(State(state): State<AppState>, Form(query): Form<ReportQuery>) -> Html<String> {
    let report = run_report(state.source.as_ref(), &state.summarizer, &query).await;
    Html(render_page(&report))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_page(report: &Report) -> String {
    let error_block = match &report.error {
        Some(msg) => format!(r#"<p class="error">{}</p>"#, escape_html(msg)),
        None => String::new(),
    };

    let insights_block = if report.insights.is_empty() {
        String::new()
    } else {
        format!(
            "<h2>Insights</h2>\n<p class=\"insights\">{}</p>",
            escape_html(&report.insights)
        )
    };

    let routes_json = serde_json::to_string(&report.routes_chart)
        .unwrap_or_else(|_| "null".to_string());
    let price_json = serde_json::to_string(&report.price_chart)
        .unwrap_or_else(|_| "null".to_string());

    let f = &report.filters;
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Airline Market Demand</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
</head>
<body>
<h1>Airline Market Demand</h1>
<form method="post" action="/">
  <label>Start date <input type="text" name="start_date" placeholder="YYYY-MM-DD" value="{start}"></label>
  <label>End date <input type="text" name="end_date" placeholder="YYYY-MM-DD" value="{end}"></label>
  <label>Origin <input type="text" name="origin" value="{origin}"></label>
  <label>Destination <input type="text" name="destination" value="{destination}"></label>
  <button type="submit">Run report</button>
</form>
{error_block}
{insights_block}
<div id="routes-chart"></div>
<div id="price-chart"></div>
<script>
const routesSpec = {routes_json};
const priceSpec = {price_json};
function draw(id, spec) {{
  if (!spec) return;
  const trace = {{
    x: spec.points.map(p => p.label),
    y: spec.points.map(p => p.value),
    type: spec.kind === 'bar' ? 'bar' : 'scatter',
    mode: 'lines+markers',
  }};
  Plotly.newPlot(id, [trace], {{
    title: spec.title,
    xaxis: {{ title: spec.x_title }},
    yaxis: {{ title: spec.y_title }},
  }});
}}
draw('routes-chart', routesSpec);
draw('price-chart', priceSpec);
</script>
</body>
</html>
"#,
        start = escape_html(f.start_date.as_deref().unwrap_or("")),
        end = escape_html(f.end_date.as_deref().unwrap_or("")),
        origin = escape_html(f.origin.as_deref().unwrap_or("")),
        destination = escape_html(f.destination.as_deref().unwrap_or("")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A & B"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_page_empty_report_has_no_charts() {
        let page = render_page(&Report::default());
        assert!(page.contains("const routesSpec = null;"));
        assert!(page.contains("const priceSpec = null;"));
        assert!(!page.contains("<h2>Insights</h2>"));
    }

    #[test]
    fn test_render_page_echoes_filters_escaped() {
        let report = Report {
            filters: ReportQuery {
                origin: Some(r#"Syd"ney"#.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let page = render_page(&report);
        assert!(page.contains(r#"value="Syd&quot;ney""#));
    }

    #[test]
    fn test_render_page_shows_error_message() {
        let report = Report {
            error: Some("No data found for the selected filters.".to_string()),
            ..Default::default()
        };

        let page = render_page(&report);
        assert!(page.contains("No data found for the selected filters."));
    }
}
