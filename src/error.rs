use thiserror::Error;

/// Errors surfaced by the toolkit
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Caller supplied an input the computation cannot accept
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// External market data source missing or failed to initialise.
    /// Synthesizers recover from this locally.
    #[error("market data source unavailable: {0}")]
    ConfigurationAbsent(String),

    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),
}

impl ToolkitError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Reject anything that is not a finite, strictly positive number
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> crate::Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ToolkitError::invalid(
            name,
            format!("must be finite and > 0, got {}", value),
        ))
    }
}
