//! Optional policy check for a built job.
//!
//! The builder passes every field through untouched. Whether an empty bracket
//! or a non-numeric price is acceptable is decided here, by an explicit
//! [`ValidationPolicy`], or left entirely to the execution engine when the
//! policy is the permissive default.
//!
//! Checks run low side first, then high. Within a side the order is:
//! threshold, amount, limit price, then start and stop price for trailing legs.
//! The first failure is returned.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::types::{ConditionalLeg, OcoJob, Side, ThresholdBinding};

/// What [`validate`] rejects. Everything is off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Reject a job whose low and high sides are both empty.
    pub reject_empty_bracket: bool,
    /// Reject price or amount text that is not a decimal number.
    pub require_numeric: bool,
    /// Reject numbers that are zero or negative. Implies `require_numeric`.
    pub require_positive: bool,
}

impl ValidationPolicy {
    /// Every check enabled.
    pub fn strict() -> Self {
        Self {
            reject_empty_bracket: true,
            require_numeric: true,
            require_positive: true,
        }
    }

    fn checks_numbers(&self) -> bool {
        self.require_numeric || self.require_positive
    }
}

/// Parse decimal text, naming `field` in the error.
pub fn parse_decimal(field: &str, value: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(value).map_err(|_| ValidationError::NotNumeric {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Apply `policy` to `job`.
pub fn validate(job: &OcoJob, policy: &ValidationPolicy) -> Result<(), ValidationError> {
    if policy.reject_empty_bracket && job.is_empty_bracket() {
        return Err(ValidationError::EmptyBracket);
    }
    for side in Side::BOTH {
        validate_side(job, side, policy)?;
    }
    Ok(())
}

fn numeric_fields(binding: &ThresholdBinding) -> Vec<(&'static str, &str)> {
    let mut fields = vec![
        ("thresholdAsString", binding.threshold_as_string.as_str()),
        ("amount", binding.leg.amount()),
        ("limitPrice", binding.leg.limit_price()),
    ];
    if let ConditionalLeg::TrailingStop(t) = &binding.leg {
        fields.push(("startPrice", t.start_price.as_str()));
        fields.push(("stopPrice", t.stop_price.as_str()));
    }
    fields
}

fn check_number(policy: &ValidationPolicy, field: &str, value: &str) -> Result<(), ValidationError> {
    let number = parse_decimal(field, value)?;
    if policy.require_positive && number <= Decimal::ZERO {
        return Err(ValidationError::NotPositive {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Numeric checks for one side only. An absent side passes.
pub fn validate_side(job: &OcoJob, side: Side, policy: &ValidationPolicy) -> Result<(), ValidationError> {
    let Some(binding) = job.binding(side) else {
        return Ok(());
    };
    if !policy.checks_numbers() {
        return Ok(());
    }
    for (name, value) in numeric_fields(binding) {
        check_number(policy, &format!("{side}.{name}"), value)?;
    }
    Ok(())
}
