//! Enumerations shared by the draft, the builder and the wire format.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OcoError;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Buy or sell. One direction applies to every leg of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = OcoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(OcoError::Draft {
                field: "direction",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Job type discriminators
// ---------------------------------------------------------------------------

/// Wire discriminator carried in the `jobType` field.
///
/// The execution engine dispatches on these exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "LIMIT_ORDER")]
    LimitOrder,
    #[serde(rename = "SOFT_TRAILING_STOP")]
    SoftTrailingStop,
    #[serde(rename = "OCO")]
    Oco,
}

impl JobType {
    pub const LIMIT_ORDER: &'static str = "LIMIT_ORDER";
    pub const SOFT_TRAILING_STOP: &'static str = "SOFT_TRAILING_STOP";
    pub const OCO: &'static str = "OCO";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LimitOrder => Self::LIMIT_ORDER,
            Self::SoftTrailingStop => Self::SOFT_TRAILING_STOP,
            Self::Oco => Self::OCO,
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Bracket sides and leg shapes
// ---------------------------------------------------------------------------

/// One side of the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Low,
    High,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Low, Side::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which leg shape a side produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegKind {
    Limit,
    TrailingStop,
}

impl LegKind {
    pub fn from_trailing(trailing: bool) -> Self {
        if trailing { Self::TrailingStop } else { Self::Limit }
    }

    pub fn job_type(&self) -> JobType {
        match self {
            Self::Limit => JobType::LimitOrder,
            Self::TrailingStop => JobType::SoftTrailingStop,
        }
    }
}
