use thiserror::Error;

/// Failures reported by the simulation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// An input violates one of the engine preconditions.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human readable description of the violation.
        reason: String,
    },
    /// A computation produced a non-finite value.
    #[error("numeric anomaly in {context}")]
    NumericAnomaly {
        /// Where the value was detected.
        context: String,
    },
    /// The path matrix would not fit in the configured budget.
    #[error("path matrix of {requested} cells exceeds the limit of {limit} cells")]
    ResourceExhaustion {
        /// Cells the run would allocate (`num_simulations * (days + 1)`).
        requested: u64,
        /// Configured maximum.
        limit: u64,
    },
}

impl SimulationError {
    /// Builds an [`SimulationError::InvalidParameter`].
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// Builds a [`SimulationError::NumericAnomaly`].
    pub fn anomaly(context: impl Into<String>) -> Self {
        Self::NumericAnomaly {
            context: context.into(),
        }
    }

    /// Returns true when the error was caused by caller input rather than
    /// by the computation itself.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::ResourceExhaustion { .. }
        )
    }
}

/// Result type returned by the engine.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimulationError::invalid("days", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid parameter `days`: must be greater than zero"
        );

        let err = SimulationError::ResourceExhaustion {
            requested: 10,
            limit: 5,
        };
        assert_eq!(
            err.to_string(),
            "path matrix of 10 cells exceeds the limit of 5 cells"
        );
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(SimulationError::invalid("days", "zero").is_caller_error());
        assert!(
            SimulationError::ResourceExhaustion {
                requested: 2,
                limit: 1
            }
            .is_caller_error()
        );
        assert!(!SimulationError::anomaly("mean_path").is_caller_error());
    }
}
