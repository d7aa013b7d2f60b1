//! In-process job queue.
//!
//! [`QueueSubmitter`] pushes jobs onto an unbounded channel whose receiving
//! end belongs to the execution side (in the runner, a worker task). Each
//! hand-off is reported on the [`SubmitEvent`] channel.

use anyhow::Result;
use async_trait::async_trait;
use oco_core::Job;
use oco_core::error::OcoError;
use tracing::{debug, warn};

use crate::event::{SubmitEvent, SubmitEventReceiver, SubmitEventSender};

/// Sender half of the job queue.
pub type JobSender = tokio::sync::mpsc::UnboundedSender<Job>;

/// Receiver half of the job queue, owned by the execution side.
pub type JobReceiver = tokio::sync::mpsc::UnboundedReceiver<Job>;

/// Submits jobs to an in-process queue.
#[derive(Debug, Clone)]
pub struct QueueSubmitter {
    jobs_tx: JobSender,
    event_tx: SubmitEventSender,
}

impl QueueSubmitter {
    /// Create a submitter.
    ///
    /// Returns the submitter, the queue the execution side should drain, and
    /// a receiver for [`SubmitEvent`]s.
    pub fn new() -> (Self, JobReceiver, SubmitEventReceiver) {
        let (jobs_tx, jobs_rx) = tokio::sync::mpsc::unbounded_channel();
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { jobs_tx, event_tx }, jobs_rx, event_rx)
    }

    /// A clone of the event sender, for wrappers that report on this stream.
    pub fn events(&self) -> SubmitEventSender {
        self.event_tx.clone()
    }
}

#[async_trait]
impl crate::JobSubmitter for QueueSubmitter {
    fn name(&self) -> &str {
        "queue"
    }

    async fn submit(&self, job: Job) -> Result<()> {
        let job_id = job.id();
        let job_type = job.job_type();

        if self.jobs_tx.send(job).is_err() {
            warn!("[queue] execution side has gone away, dropping {job_type} job {job_id}");
            let _ = self.event_tx.send(SubmitEvent::Rejected {
                job_id,
                reason: "job queue closed".to_string(),
            });
            return Err(OcoError::Submit(format!("job queue closed, {job_type} job {job_id} not queued")).into());
        }

        debug!("[queue] queued {job_type} job {job_id}");
        let _ = self.event_tx.send(SubmitEvent::Accepted { job_id, job_type });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use oco_core::builder::JobBuilder;
    use oco_core::draft::DraftState;
    use oco_core::ids::SequentialIds;
    use oco_core::{JobType, TickTrigger};

    use super::*;
    use crate::JobSubmitter;

    fn job() -> Job {
        let draft = DraftState {
            high_price: "200".into(),
            high_limit_price: "199".into(),
            amount: "1".into(),
            ..Default::default()
        };
        JobBuilder::new(SequentialIds::default())
            .build(&draft, &TickTrigger::new("binance", "BTC", "USD"))
            .into()
    }

    #[tokio::test]
    async fn queued_job_arrives_intact() {
        let (submitter, mut jobs, mut events) = QueueSubmitter::new();
        let sent = job();
        submitter.submit(sent.clone()).await.unwrap();

        let received = jobs.recv().await.unwrap();
        assert_eq!(received, sent);

        let v = serde_json::to_value(&received).unwrap();
        assert_eq!(v["jobType"], "OCO");
        assert_eq!(v["high"]["job"]["jobType"], "LIMIT_ORDER");

        assert_eq!(
            events.recv().await.unwrap(),
            SubmitEvent::Accepted {
                job_id: sent.id(),
                job_type: JobType::Oco,
            }
        );
    }

    #[tokio::test]
    async fn closed_queue_rejects() {
        let (submitter, jobs, mut events) = QueueSubmitter::new();
        drop(jobs);

        let sent = job();
        assert!(submitter.submit(sent.clone()).await.is_err());
        match events.recv().await.unwrap() {
            SubmitEvent::Rejected { job_id, .. } => assert_eq!(job_id, sent.id()),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
