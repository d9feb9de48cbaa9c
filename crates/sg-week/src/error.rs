// error.rs — Error types for week parsing.
//
// Week arithmetic itself cannot fail on a valid NaiveDate. Only turning
// user-supplied text into a WeekKey or a week-start convention can.

use thiserror::Error;

/// Errors that can occur while parsing week inputs.
#[derive(Debug, Error)]
pub enum WeekError {
    /// The text is not a `YYYY-MM-DD` date.
    #[error("invalid date '{input}': {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },

    /// The date is valid but too close to the calendar's ends to have
    /// a previous and a following week.
    #[error("week '{0}' is outside the supported calendar range")]
    OutOfRange(String),

    /// The week-start convention is not one we know.
    #[error("unknown week start '{0}' (expected 'sunday' or 'monday')")]
    UnknownWeekStart(String),

    /// The view scope name is not one we know.
    #[error("unknown view scope '{0}' (expected 'me' or 'team')")]
    UnknownScope(String),
}
