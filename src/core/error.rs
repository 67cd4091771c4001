//! Errors raised while composing a price

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    /// Charges and margin together leave no room for the real cost, so the
    /// sale price has no positive solution.
    #[error(
        "Invalid composition: charges ({charges}%) plus margin ({margin}%) must be below 100%"
    )]
    InvalidComposition { charges: f64, margin: f64 },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Malformed breakdown: {0}")]
    MalformedBreakdown(String),
    #[error("Unknown line item: {0}")]
    UnknownItem(String),
    #[error("Line item '{0}' is not editable")]
    NotEditable(String),
}

pub type Result<T, E = CompositionError> = std::result::Result<T, E>;

/// Rejects negative and non-finite values.
pub(crate) fn ensure_non_negative(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CompositionError::InvalidInput(format!(
            "{what} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(CompositionError::InvalidInput(format!(
            "{what} must not be negative, got {value}"
        )));
    }
    Ok(())
}
