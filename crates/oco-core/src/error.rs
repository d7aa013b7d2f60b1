//! Typed error definitions for the OCO job pipeline.
//!
//! Provides [`OcoError`] for draft editing, configuration and submission
//! failures, and [`ValidationError`] for the optional policy check applied to
//! a built job. Both implement `std::error::Error` via `thiserror`, so they
//! integrate with `anyhow::Result` in the binaries.
//!
//! The job builder itself never returns an error.

use thiserror::Error;

/// Domain-specific errors for the OCO job pipeline.
#[derive(Debug, Error)]
pub enum OcoError {
    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// A raw value could not be applied to a typed draft field.
    #[error("draft error: {field}: cannot accept {value:?}")]
    Draft { field: &'static str, value: String },

    /// A value was supplied through the focus delegate with no field focused.
    #[error("no draft field is focused")]
    NoFocus,

    /// The selected instrument could not be parsed.
    #[error("instrument error: {0}")]
    Instrument(String),

    /// The built job failed the configured validation policy.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The job could not be handed to the submission subsystem.
    #[error("submit error: {0}")]
    Submit(String),
}

/// Reasons a built job is rejected by [`validate`](crate::validate::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Neither the low nor the high threshold was supplied.
    #[error("bracket has neither a low nor a high side")]
    EmptyBracket,

    /// A price or amount field is not a decimal number.
    #[error("{field} is not a number: {value:?}")]
    NotNumeric { field: String, value: String },

    /// A price or amount field parsed but is zero or negative.
    #[error("{field} must be positive: {value:?}")]
    NotPositive { field: String, value: String },
}
