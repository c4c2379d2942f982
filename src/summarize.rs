//! Prose insight generation from aggregate summaries.

use std::sync::Arc;
use tracing::warn;

use crate::aggregate::{DateAggregate, RouteAggregate};
use crate::openai::TextGenerator;

/// Builds an analyst prompt from the aggregate result sets and asks the
/// injected [`TextGenerator`] for a prose summary.
///
/// Generation failures never abort the request: they degrade to a
/// human-readable placeholder so the charts still render.
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Embeds the serialized aggregates in a natural-language prompt.
    pub fn build_prompt(
        top_routes: &[RouteAggregate],
        price_trend: &[DateAggregate],
        high_demand_dates: &[DateAggregate],
    ) -> String {
        let routes_json = serde_json::to_string(top_routes).unwrap_or_default();
        let trend_json = serde_json::to_string(price_trend).unwrap_or_default();
        let dates_json = serde_json::to_string(high_demand_dates).unwrap_or_default();

        format!(
            "You are a helpful data analyst assistant specialized in airline market demand.\n\
             \n\
             Given the following data summaries:\n\
             \n\
             Popular Routes by Demand and Average Price:\n\
             {routes_json}\n\
             \n\
             Average Price Per Date:\n\
             {trend_json}\n\
             \n\
             High Demand Dates:\n\
             {dates_json}\n\
             \n\
             Please provide a concise summary of demand trends, pricing changes, \
             and recommend any valuable insights for airline market demand optimization."
        )
    }

    /// Returns the generated insight text, or a placeholder describing the
    /// failure. Single attempt, no retries.
    #[tracing::instrument(skip_all, fields(top_routes = top_routes.len()))]
    pub async fn summarize(
        &self,
        top_routes: &[RouteAggregate],
        price_trend: &[DateAggregate],
        high_demand_dates: &[DateAggregate],
    ) -> String {
        let prompt = Self::build_prompt(top_routes, price_trend, high_demand_dates);

        match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Insight generation failed");
                format!("Error generating insights: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::GenerateError;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct CannedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            Err(GenerateError::Network("connection refused".to_string()))
        }
    }

    fn sample_aggregates() -> (Vec<RouteAggregate>, Vec<DateAggregate>) {
        let routes = vec![RouteAggregate {
            route: "Melbourne (MEL) - Sydney (SYD)".into(),
            mean_demand: 78.0,
            mean_price: 110.0,
            count: 1,
        }];
        let dates = vec![DateAggregate {
            date: NaiveDate::from_ymd_opt(2023, 10, 2).unwrap(),
            mean_price: 145.0,
            mean_demand: 64.0,
            count: 2,
        }];
        (routes, dates)
    }

    #[test]
    fn test_prompt_embeds_serialized_aggregates() {
        let (routes, dates) = sample_aggregates();
        let prompt = Summarizer::build_prompt(&routes, &dates, &dates);

        assert!(prompt.contains("Melbourne (MEL) - Sydney (SYD)"));
        assert!(prompt.contains("2023-10-02"));
        assert!(prompt.contains("Popular Routes by Demand and Average Price:"));
        assert!(prompt.contains("High Demand Dates:"));
    }

    #[tokio::test]
    async fn test_summarize_returns_generated_text() {
        let (routes, dates) = sample_aggregates();
        let summarizer = Summarizer::new(Arc::new(CannedGenerator("Demand is strong.")));

        let text = summarizer.summarize(&routes, &dates, &dates).await;
        assert_eq!(text, "Demand is strong.");
    }

    #[tokio::test]
    async fn test_summarize_degrades_to_placeholder_on_failure() {
        let (routes, dates) = sample_aggregates();
        let summarizer = Summarizer::new(Arc::new(FailingGenerator));

        let text = summarizer.summarize(&routes, &dates, &dates).await;
        assert!(text.starts_with("Error generating insights:"));
        assert!(text.contains("connection refused"));
    }
}
