//! Job builder: turns a finished [`DraftState`] into an [`OcoJob`].
//!
//! The build is a pure transform apart from the ids it draws from its
//! [`IdGenerator`]. It never fails: a blank threshold simply leaves that side
//! empty, and price or amount text is copied through without parsing. Use
//! [`validate`](crate::validate::validate) when a policy check is wanted.
//!
//! Both legs take the draft's single direction and amount. The leg shape for
//! each side is chosen by [`LegKind`].

use tracing::debug;

use crate::draft::DraftState;
use crate::ids::{IdGenerator, UuidIdGenerator};
use crate::types::{
    ConditionalLeg, Direction, LegKind, LimitOrderLeg, OcoJob, Side, ThresholdBinding, TickTrigger,
    TrailingStopLeg,
};

/// Builds OCO jobs, drawing one id per leg and one per job.
#[derive(Debug, Default)]
pub struct JobBuilder<G = UuidIdGenerator> {
    ids: G,
}

impl JobBuilder<UuidIdGenerator> {
    /// Builder with random v4 ids.
    pub fn uuid() -> Self {
        Self { ids: UuidIdGenerator }
    }
}

impl<G: IdGenerator> JobBuilder<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    /// Build a job for `instrument` from `draft`.
    pub fn build(&self, draft: &DraftState, instrument: &TickTrigger) -> OcoJob {
        let trigger = instrument.clone();
        let low = self.bind(draft, Side::Low, &trigger);
        let high = self.bind(draft, Side::High, &trigger);
        let job = OcoJob {
            id: self.ids.next_id(),
            tick_trigger: trigger,
            low,
            high,
        };
        debug!(
            "built OCO job {} on {}: low={} high={}",
            job.id,
            job.tick_trigger,
            describe(job.low.as_ref()),
            describe(job.high.as_ref()),
        );
        job
    }

    fn bind(&self, draft: &DraftState, side: Side, trigger: &TickTrigger) -> Option<ThresholdBinding> {
        if !draft.has_side(side) {
            return None;
        }
        Some(ThresholdBinding {
            threshold_as_string: draft.threshold(side).to_string(),
            leg: self.build_leg(draft, side, trigger),
        })
    }

    /// Build the leg `side` would submit, whether or not its threshold is set.
    pub fn build_leg(&self, draft: &DraftState, side: Side, trigger: &TickTrigger) -> ConditionalLeg {
        let common = LegCommon {
            direction: draft.direction,
            trigger,
            amount: &draft.amount,
        };
        match draft.leg_kind(side) {
            LegKind::Limit => self.make_limit_leg(common, draft.limit_price(side)),
            LegKind::TrailingStop => self.make_trailing_leg(
                common,
                draft.threshold(side),
                &draft.initial_trailing_stop,
                draft.limit_price(side),
            ),
        }
    }

    pub fn make_limit_leg(&self, common: LegCommon<'_>, limit_price: &str) -> ConditionalLeg {
        ConditionalLeg::LimitOrder(LimitOrderLeg {
            id: self.ids.next_id(),
            direction: common.direction,
            tick_trigger: common.trigger.clone(),
            amount: common.amount.to_string(),
            limit_price: limit_price.to_string(),
        })
    }

    /// `last_sync_price` is seeded from `start_price`.
    pub fn make_trailing_leg(
        &self,
        common: LegCommon<'_>,
        start_price: &str,
        stop_price: &str,
        limit_price: &str,
    ) -> ConditionalLeg {
        ConditionalLeg::TrailingStop(TrailingStopLeg {
            id: self.ids.next_id(),
            direction: common.direction,
            tick_trigger: common.trigger.clone(),
            amount: common.amount.to_string(),
            start_price: start_price.to_string(),
            last_sync_price: start_price.to_string(),
            stop_price: stop_price.to_string(),
            limit_price: limit_price.to_string(),
        })
    }
}

/// Fields every leg of one job shares.
#[derive(Debug, Clone, Copy)]
pub struct LegCommon<'a> {
    pub direction: Direction,
    pub trigger: &'a TickTrigger,
    pub amount: &'a str,
}

fn describe(binding: Option<&ThresholdBinding>) -> String {
    match binding {
        Some(b) => format!("{}@{}", b.leg.job_type(), b.threshold_as_string),
        None => "none".to_string(),
    }
}
