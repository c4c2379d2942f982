//! User-facing pipeline errors.

use thiserror::Error;

/// Errors that abort a single report request.
///
/// Each variant renders as the message shown to the user; none of them
/// propagate as process-level faults. Insight-generation failures are not
/// represented here because they degrade to a placeholder string inside
/// [`crate::summarize::Summarizer`] instead of aborting the request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A date string was not in `YYYY-MM-DD` form. `field` names the input
    /// that failed (e.g. "start date").
    #[error("Invalid {field} format. Use YYYY-MM-DD.")]
    DateParse { field: String },

    /// The filters matched zero rows.
    #[error("No data found for the selected filters.")]
    EmptyResult,

    /// The fare source could not produce a batch.
    #[error("Failed to fetch fare data: {0}")]
    SourceFetch(String),
}

impl PipelineError {
    pub fn date_parse(field: &str) -> Self {
        PipelineError::DateParse {
            field: field.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parse_message_names_field() {
        let e = PipelineError::date_parse("start date");
        assert_eq!(e.to_string(), "Invalid start date format. Use YYYY-MM-DD.");
    }

    #[test]
    fn test_empty_result_message() {
        assert_eq!(
            PipelineError::EmptyResult.to_string(),
            "No data found for the selected filters."
        );
    }
}
