//! Pure narrowing of a normalized batch by date range and airport substrings.

use chrono::NaiveDate;

use crate::error::PipelineError;
use crate::normalize::Record;

/// Parsed filter constraints. All fields are optional; `None` means the
/// constraint is not applied.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl FilterParams {
    /// Builds constraints from raw form values.
    ///
    /// Blank strings are treated as absent. Dates must be `YYYY-MM-DD`; a
    /// malformed value is a [`PipelineError::DateParse`] naming the field.
    pub fn parse(
        start_date: Option<&str>,
        end_date: Option<&str>,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> Result<Self, PipelineError> {
        Ok(FilterParams {
            start_date: parse_date_field(start_date, "start date")?,
            end_date: parse_date_field(end_date, "end date")?,
            origin: non_blank(origin),
            destination: non_blank(destination),
        })
    }
}

fn parse_date_field(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, PipelineError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| PipelineError::date_parse(field)),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Returns the subsequence of `records` satisfying every given constraint,
/// preserving order. With no constraints the input comes back unchanged.
///
/// Substring matches are case-insensitive; records whose origin/destination
/// failed to parse never match a substring constraint.
pub fn apply(records: &[Record], params: &FilterParams) -> Vec<Record> {
    let origin_needle = params.origin.as_deref().map(str::to_lowercase);
    let destination_needle = params.destination.as_deref().map(str::to_lowercase);

    records
        .iter()
        .filter(|r| {
            if let Some(start) = params.start_date {
                if r.date < start {
                    return false;
                }
            }
            if let Some(end) = params.end_date {
                if r.date > end {
                    return false;
                }
            }
            if let Some(needle) = &origin_needle {
                if !contains_ci(r.origin.as_deref(), needle) {
                    return false;
                }
            }
            if let Some(needle) = &destination_needle {
                if !contains_ci(r.destination.as_deref(), needle) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

fn contains_ci(haystack: Option<&str>, lowercase_needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(lowercase_needle))
}
