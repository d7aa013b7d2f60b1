//! Policy check in front of another submitter.
//!
//! Only OCO jobs are checked; standalone legs pass straight through. A
//! rejected job never reaches the inner submitter.

use anyhow::Result;
use async_trait::async_trait;
use oco_core::Job;
use oco_core::error::OcoError;
use oco_core::validate::{ValidationPolicy, validate};
use tracing::warn;

use crate::JobSubmitter;
use crate::event::{SubmitEvent, SubmitEventSender};

/// Applies a [`ValidationPolicy`] and forwards jobs that pass.
pub struct ValidatingSubmitter<S> {
    inner: S,
    policy: ValidationPolicy,
    event_tx: Option<SubmitEventSender>,
}

impl<S: JobSubmitter> ValidatingSubmitter<S> {
    pub fn new(inner: S, policy: ValidationPolicy) -> Self {
        Self {
            inner,
            policy,
            event_tx: None,
        }
    }

    /// Report rejections on `event_tx`.
    pub fn with_events(mut self, event_tx: SubmitEventSender) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }
}

#[async_trait]
impl<S: JobSubmitter> JobSubmitter for ValidatingSubmitter<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn submit(&self, job: Job) -> Result<()> {
        if let Job::Oco(oco) = &job {
            if let Err(e) = validate(oco, &self.policy) {
                warn!("[{}] rejected OCO job {}: {e}", self.name(), oco.id);
                if let Some(tx) = &self.event_tx {
                    let _ = tx.send(SubmitEvent::Rejected {
                        job_id: oco.id,
                        reason: e.to_string(),
                    });
                }
                return Err(OcoError::Validation(e).into());
            }
        }
        self.inner.submit(job).await
    }
}

#[cfg(test)]
mod tests {
    use oco_core::builder::JobBuilder;
    use oco_core::draft::DraftState;
    use oco_core::error::ValidationError;
    use oco_core::ids::SequentialIds;
    use oco_core::TickTrigger;

    use super::*;
    use crate::queue::QueueSubmitter;

    fn build(draft: &DraftState) -> Job {
        JobBuilder::new(SequentialIds::default())
            .build(draft, &TickTrigger::new("binance", "BTC", "USD"))
            .into()
    }

    #[tokio::test]
    async fn empty_bracket_never_reaches_queue() {
        let (queue, mut jobs, mut events) = QueueSubmitter::new();
        let events_tx = queue.events();
        let submitter = ValidatingSubmitter::new(queue, ValidationPolicy::strict()).with_events(events_tx);

        let err = submitter.submit(build(&DraftState::default())).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OcoError>(),
            Some(OcoError::Validation(ValidationError::EmptyBracket))
        ));
        assert!(matches!(events.recv().await.unwrap(), SubmitEvent::Rejected { .. }));
        assert!(jobs.try_recv().is_err());
    }

    #[tokio::test]
    async fn valid_job_is_forwarded() {
        let (queue, mut jobs, _events) = QueueSubmitter::new();
        let submitter = ValidatingSubmitter::new(queue, ValidationPolicy::strict());
        let draft = DraftState {
            low_price: "100".into(),
            low_limit_price: "99".into(),
            amount: "1".into(),
            ..Default::default()
        };
        let job = build(&draft);
        submitter.submit(job.clone()).await.unwrap();
        assert_eq!(jobs.recv().await.unwrap(), job);
        assert_eq!(submitter.name(), "queue");
    }

    #[tokio::test]
    async fn permissive_policy_forwards_garbage() {
        let (queue, mut jobs, _events) = QueueSubmitter::new();
        let submitter = ValidatingSubmitter::new(queue, ValidationPolicy::default());
        let draft = DraftState {
            low_price: "soon".into(),
            ..Default::default()
        };
        submitter.submit(build(&draft)).await.unwrap();
        assert!(jobs.recv().await.is_some());
    }
}
