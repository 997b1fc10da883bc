//! Unified operation error.

use thiserror::Error;

use crate::alpaca::AlpacaError;

/// Any failure inside one tool operation.
///
/// Argument validation, handle construction, and backend failures all
/// collapse into this one type so the operation boundary can render every
/// failure the same way. The caller has no other error channel.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Caller-supplied argument rejected before any backend call.
    #[error("{0}")]
    InvalidArgument(String),

    /// Handle construction or backend call failed.
    #[error(transparent)]
    Backend(#[from] AlpacaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_displays_bare_message() {
        let err = ToolError::InvalidArgument("quantity must be a positive number".to_string());
        assert_eq!(err.to_string(), "quantity must be a positive number");
    }

    #[test]
    fn backend_error_displays_transparently() {
        let err = ToolError::from(AlpacaError::NotFound("order gone".to_string()));
        assert_eq!(err.to_string(), "not found: order gone");
    }
}
