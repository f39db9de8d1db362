//! Noise construction settings

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::linalg::DEFAULT_TOLERANCE;

/// Where sampled error operations go relative to the ideal operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLocation {
    /// The error stands in for the operation
    #[default]
    Replace,
    /// Error acts before the operation
    Before,
    /// Error acts after the operation
    After,
}

/// Settings used when decomposing a Kraus set into a gate error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Tolerance for identity, unitary and CPTP checks
    pub tolerance: f64,
    /// Placement of a sampled unitary; replaces the operation by default
    pub unitary_location: ErrorLocation,
    /// Placement of the residual Kraus map; follows the operation by default
    pub kraus_location: ErrorLocation,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            tolerance: DEFAULT_TOLERANCE,
            unitary_location: ErrorLocation::Replace,
            kraus_location: ErrorLocation::After,
        }
    }
}

impl NoiseConfig {
    /// Default settings with a different tolerance
    pub fn with_tolerance(tolerance: f64) -> Self {
        NoiseConfig { tolerance, ..Self::default() }
    }

    /// Default settings with both branches placed at `location`
    pub fn with_error_location(location: ErrorLocation) -> Self {
        NoiseConfig {
            unitary_location: location,
            kraus_location: location,
            ..Self::default()
        }
    }

    /// Reject negative or non-finite tolerances
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ValidationError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

impl ErrorLocation {
    /// Build the replacement sequence for `op` with `error` inserted
    pub(crate) fn place<T>(self, op: T, error: T) -> Vec<T> {
        match self {
            ErrorLocation::Replace => vec![error],
            ErrorLocation::Before => vec![error, op],
            ErrorLocation::After => vec![op, error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_orders_error_and_operation() {
        assert_eq!(ErrorLocation::Replace.place("op", "err"), vec!["err"]);
        assert_eq!(ErrorLocation::Before.place("op", "err"), vec!["err", "op"]);
        assert_eq!(ErrorLocation::After.place("op", "err"), vec!["op", "err"]);
    }
}
