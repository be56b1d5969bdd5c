//! Error types for the factor overlay pipeline.

use thiserror::Error;

/// Result type alias using FactorError.
pub type FactorResult<T> = Result<T, FactorError>;

/// Primary error type for factor overlay operations.
///
/// The pipeline deliberately keeps this surface small: bad config data
/// degrades instead of erroring (malformed colors become transparent via
/// `Rgba::parse_lossy`, unknown registry ids resolve to `None`), so a
/// rendering pipeline never halts the host map on data-quality issues.
/// Only legend JSON that cannot be parsed at all is reported.
#[derive(Debug, Error)]
pub enum FactorError {
    #[error("Invalid legend definition: {0}")]
    InvalidLegend(String),
}
