//! Error types for the tax and employment cost engine.
//!
//! Input errors are raised before any arithmetic takes place; policy errors
//! come from loading or validating a policy file; calculation errors mean the
//! policy could not price a particular income.

use thiserror::Error;

/// Every failure the engine can report.
///
/// # Example
///
/// ```
/// use tax_cost_engine::error::EngineError;
///
/// let error = EngineError::invalid_input("annual_months", "must be greater than zero");
/// assert_eq!(
///     error.to_string(),
///     "Invalid input 'annual_months': must be greater than zero"
/// );
/// assert!(error.is_input_error());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A caller-supplied field was negative, out of range or otherwise unusable.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// Name of the rejected field.
        field: String,
        /// Why it was rejected.
        message: String,
    },

    /// No policy file exists at `path`.
    #[error("Policy file not found: {path}")]
    ConfigNotFound {
        /// Path that was tried.
        path: String,
    },

    /// The policy file is not valid YAML or lacks a required field.
    #[error("Cannot read policy file '{path}': {message}")]
    ConfigParseError {
        /// Path of the offending file.
        path: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A policy parsed correctly but its rates or tax table are inconsistent.
    #[error("Invalid policy: {message}")]
    InvalidPolicy {
        /// The inconsistency found.
        message: String,
    },

    /// The policy could not produce a result for otherwise valid input.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// What went wrong.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the caller, not the policy, is at fault.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Result alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;
