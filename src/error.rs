use std::error::Error;
use std::fmt;

/// Custom error type for metric computation failures
#[derive(Debug, PartialEq, Eq)]
pub enum MetricsError {
    NaNFound(usize), // Number of NaN scores found
    LengthMismatch,
    SingleClass,
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetricsError::NaNFound(count) => {
                write!(f, "Found {} NaN values in scores array", count)
            }
            MetricsError::LengthMismatch => {
                write!(f, "Scores and label arrays must have equal length")
            }
            MetricsError::SingleClass => {
                write!(f, "Labels contain a single class; ROC is undefined")
            }
        }
    }
}

impl Error for MetricsError {}
