//! # oco-submit
//!
//! Submission boundary between the job builder and the execution subsystem.
//!
//! Every submitter implements [`JobSubmitter`]: it accepts one [`Job`] and
//! reports only whether the hand-off succeeded. What happens to the job after
//! that is the execution engine's business.
//!
//! | Submitter             | Module       | Behaviour                                  |
//! |-----------------------|--------------|--------------------------------------------|
//! | `QueueSubmitter`      | `queue`      | in-process unbounded queue + event stream  |
//! | `ValidatingSubmitter` | `validating` | policy check, then delegates               |

pub mod event;
pub mod queue;
pub mod validating;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use oco_core::Job;
use tracing::{error, info};

/// Trait implemented by all job submitters.
///
/// `submit` takes `&self` so one submitter can be shared between sessions.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Human-readable submitter name.
    fn name(&self) -> &str;

    /// Hand `job` to the execution subsystem.
    ///
    /// Returns once the job is accepted for processing, not once it runs.
    async fn submit(&self, job: Job) -> Result<()>;
}

#[async_trait]
impl<S: JobSubmitter + ?Sized> JobSubmitter for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn submit(&self, job: Job) -> Result<()> {
        (**self).submit(job).await
    }
}

/// Fire-and-forget submission.
///
/// Spawns the hand-off on the current runtime and returns immediately. The
/// outcome is only logged; callers that care should watch the submitter's
/// event stream.
pub fn dispatch(submitter: Arc<dyn JobSubmitter>, job: Job) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let id = job.id();
        let job_type = job.job_type();
        match submitter.submit(job).await {
            Ok(()) => info!("[{}] dispatched {job_type} job {id}", submitter.name()),
            Err(e) => error!("[{}] dispatch of {job_type} job {id} failed: {e}", submitter.name()),
        }
    })
}
