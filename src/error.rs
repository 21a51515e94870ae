use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset errors – raised by the loader before the dashboard exists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("dataset contains no launch records")]
    Empty,

    #[error("row {row}: payload mass {value} kg is not a non-negative number")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidOutcome { row: usize, value: i64 },
}

// ---------------------------------------------------------------------------
// Control errors – raised at the control boundary, never by a transformer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("unknown launch site {0:?}")]
    InvalidSelection(String),

    #[error("payload range [{low}, {high}] is outside [0, {max}] or inverted")]
    InvalidRange { low: f64, high: f64, max: f64 },
}
