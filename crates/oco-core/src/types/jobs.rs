//! Job structures: conditional legs, threshold bindings and the OCO job.
//!
//! These are the values handed to the execution subsystem. Field names follow
//! the execution engine's JSON (`tickTrigger`, `limitPrice`, ...) and every job
//! carries a `jobType` discriminator; see [`JobType`] for the exact strings.
//!
//! Price and amount fields are kept as the text the trader typed. Parsing is
//! left to [`validate`](crate::validate) or to the receiving engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Direction, JobType, Side};
use super::ticker::TickTrigger;
use crate::error::ValidationError;
use crate::validate::parse_decimal;

// ---------------------------------------------------------------------------
// Legs
// ---------------------------------------------------------------------------

/// A plain limit order, placed when its threshold is crossed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderLeg {
    pub id: Uuid,
    pub direction: Direction,
    pub tick_trigger: TickTrigger,
    pub amount: String,
    pub limit_price: String,
}

/// A trailing stop. `last_sync_price` starts equal to `start_price` and is
/// owned by the execution engine from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingStopLeg {
    pub id: Uuid,
    pub direction: Direction,
    pub tick_trigger: TickTrigger,
    pub amount: String,
    pub start_price: String,
    pub last_sync_price: String,
    pub stop_price: String,
    pub limit_price: String,
}

/// Either leg shape, tagged on the wire by `jobType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "jobType")]
pub enum ConditionalLeg {
    #[serde(rename = "LIMIT_ORDER")]
    LimitOrder(LimitOrderLeg),
    #[serde(rename = "SOFT_TRAILING_STOP")]
    TrailingStop(TrailingStopLeg),
}

impl ConditionalLeg {
    pub fn id(&self) -> Uuid {
        match self {
            Self::LimitOrder(l) => l.id,
            Self::TrailingStop(t) => t.id,
        }
    }

    pub fn job_type(&self) -> JobType {
        match self {
            Self::LimitOrder(_) => JobType::LimitOrder,
            Self::TrailingStop(_) => JobType::SoftTrailingStop,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::LimitOrder(l) => l.direction,
            Self::TrailingStop(t) => t.direction,
        }
    }

    pub fn tick_trigger(&self) -> &TickTrigger {
        match self {
            Self::LimitOrder(l) => &l.tick_trigger,
            Self::TrailingStop(t) => &t.tick_trigger,
        }
    }

    pub fn amount(&self) -> &str {
        match self {
            Self::LimitOrder(l) => &l.amount,
            Self::TrailingStop(t) => &t.amount,
        }
    }

    pub fn limit_price(&self) -> &str {
        match self {
            Self::LimitOrder(l) => &l.limit_price,
            Self::TrailingStop(t) => &t.limit_price,
        }
    }
}

// ---------------------------------------------------------------------------
// Threshold binding
// ---------------------------------------------------------------------------

/// "When the price crosses `threshold_as_string`, submit `leg`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBinding {
    #[serde(rename = "thresholdAsString")]
    pub threshold_as_string: String,
    #[serde(rename = "job")]
    pub leg: ConditionalLeg,
}

// ---------------------------------------------------------------------------
// OCO job
// ---------------------------------------------------------------------------

/// A one-cancels-the-other bracket with an optional low and high side.
///
/// Either side may be `None`; a job with both sides empty is still a valid
/// value, see [`ValidationPolicy`](crate::validate::ValidationPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcoJob {
    pub id: Uuid,
    pub tick_trigger: TickTrigger,
    pub low: Option<ThresholdBinding>,
    pub high: Option<ThresholdBinding>,
}

impl OcoJob {
    pub fn binding(&self, side: Side) -> Option<&ThresholdBinding> {
        match side {
            Side::Low => self.low.as_ref(),
            Side::High => self.high.as_ref(),
        }
    }

    /// Populated sides, low first.
    pub fn bindings(&self) -> impl Iterator<Item = (Side, &ThresholdBinding)> {
        Side::BOTH
            .into_iter()
            .filter_map(move |side| self.binding(side).map(|b| (side, b)))
    }

    pub fn is_empty_bracket(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// Which side a tick at `price` fires, if any.
    ///
    /// The low side fires at or below its threshold, the high side at or
    /// above. Low is checked first. Thresholds that are not decimals are an
    /// error rather than a silent miss.
    pub fn triggered(&self, price: Decimal) -> Result<Option<Side>, ValidationError> {
        if let Some(low) = &self.low {
            let threshold = parse_decimal("low.thresholdAsString", &low.threshold_as_string)?;
            if price <= threshold {
                return Ok(Some(Side::Low));
            }
        }
        if let Some(high) = &self.high {
            let threshold = parse_decimal("high.thresholdAsString", &high.threshold_as_string)?;
            if price >= threshold {
                return Ok(Some(Side::High));
            }
        }
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Job envelope
// ---------------------------------------------------------------------------

/// Any job the execution subsystem accepts, tagged by `jobType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "jobType")]
pub enum Job {
    #[serde(rename = "OCO")]
    Oco(OcoJob),
    #[serde(rename = "LIMIT_ORDER")]
    LimitOrder(LimitOrderLeg),
    #[serde(rename = "SOFT_TRAILING_STOP")]
    SoftTrailingStop(TrailingStopLeg),
}

impl Job {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Oco(j) => j.id,
            Self::LimitOrder(l) => l.id,
            Self::SoftTrailingStop(t) => t.id,
        }
    }

    pub fn job_type(&self) -> JobType {
        match self {
            Self::Oco(_) => JobType::Oco,
            Self::LimitOrder(_) => JobType::LimitOrder,
            Self::SoftTrailingStop(_) => JobType::SoftTrailingStop,
        }
    }
}

impl From<OcoJob> for Job {
    fn from(job: OcoJob) -> Self {
        Self::Oco(job)
    }
}

impl From<ConditionalLeg> for Job {
    fn from(leg: ConditionalLeg) -> Self {
        match leg {
            ConditionalLeg::LimitOrder(l) => Self::LimitOrder(l),
            ConditionalLeg::TrailingStop(t) => Self::SoftTrailingStop(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> TickTrigger {
        TickTrigger::new("binance", "BTC", "USD")
    }

    fn limit(limit_price: &str) -> ConditionalLeg {
        ConditionalLeg::LimitOrder(LimitOrderLeg {
            id: Uuid::nil(),
            direction: Direction::Sell,
            tick_trigger: trigger(),
            amount: "1".into(),
            limit_price: limit_price.into(),
        })
    }

    fn bracket(low: Option<&str>, high: Option<&str>) -> OcoJob {
        let bind = |p: &str| ThresholdBinding {
            threshold_as_string: p.into(),
            leg: limit(p),
        };
        OcoJob {
            id: Uuid::nil(),
            tick_trigger: trigger(),
            low: low.map(bind),
            high: high.map(bind),
        }
    }

    #[test]
    fn oco_envelope_wire_format() {
        let job = Job::from(bracket(Some("100"), None));
        let v = serde_json::to_value(&job).unwrap();
        assert_eq!(v["jobType"], "OCO");
        assert_eq!(v["tickTrigger"]["exchange"], "binance");
        assert_eq!(v["low"]["thresholdAsString"], "100");
        assert_eq!(v["low"]["job"]["jobType"], "LIMIT_ORDER");
        assert_eq!(v["low"]["job"]["limitPrice"], "100");
        assert!(v["high"].is_null());
    }

    #[test]
    fn trailing_leg_wire_format() {
        let leg = ConditionalLeg::TrailingStop(TrailingStopLeg {
            id: Uuid::nil(),
            direction: Direction::Buy,
            tick_trigger: trigger(),
            amount: "2".into(),
            start_price: "200".into(),
            last_sync_price: "200".into(),
            stop_price: "190".into(),
            limit_price: "185".into(),
        });
        let v = serde_json::to_value(&leg).unwrap();
        assert_eq!(v["jobType"], "SOFT_TRAILING_STOP");
        assert_eq!(v["lastSyncPrice"], "200");
        assert_eq!(v["direction"], "BUY");

        let back: ConditionalLeg = serde_json::from_value(v).unwrap();
        assert_eq!(back, leg);
    }

    #[test]
    fn leg_promotes_to_standalone_job() {
        let job = Job::from(limit("99"));
        assert_eq!(job.job_type(), JobType::LimitOrder);
        assert_eq!(job.id(), Uuid::nil());
    }

    #[test]
    fn bindings_iterate_low_first() {
        let job = bracket(Some("90"), Some("110"));
        let sides: Vec<Side> = job.bindings().map(|(s, _)| s).collect();
        assert_eq!(sides, vec![Side::Low, Side::High]);
        assert!(bracket(None, None).is_empty_bracket());
    }

    #[test]
    fn tick_triggers_low_and_high() {
        let job = bracket(Some("90"), Some("110"));
        assert_eq!(job.triggered(Decimal::from(90)).unwrap(), Some(Side::Low));
        assert_eq!(job.triggered(Decimal::from(85)).unwrap(), Some(Side::Low));
        assert_eq!(job.triggered(Decimal::from(100)).unwrap(), None);
        assert_eq!(job.triggered(Decimal::from(110)).unwrap(), Some(Side::High));
    }

    #[test]
    fn tick_with_one_sided_bracket() {
        let job = bracket(None, Some("110"));
        assert_eq!(job.triggered(Decimal::from(1)).unwrap(), None);
        assert!(bracket(None, None).triggered(Decimal::from(1)).unwrap().is_none());
    }

    #[test]
    fn tick_rejects_malformed_threshold() {
        let job = bracket(Some("abc"), None);
        assert!(matches!(
            job.triggered(Decimal::from(1)),
            Err(ValidationError::NotNumeric { .. })
        ));
    }
}
