//! Events emitted by submitters to whoever wants to observe outcomes.
//!
//! Submission is fire-and-forget, so this channel is the only place a
//! rejection surfaces after [`dispatch`](crate::dispatch) returns.

use oco_core::JobType;
use uuid::Uuid;

/// A typed event emitted by a [`JobSubmitter`](crate::JobSubmitter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitEvent {
    /// The job was handed to the execution subsystem.
    Accepted {
        job_id: Uuid,
        job_type: JobType,
    },

    /// The job was not handed over.
    Rejected {
        job_id: Uuid,
        /// Human-readable reason.
        reason: String,
    },
}

/// Sender half of the submit event channel.
pub type SubmitEventSender = tokio::sync::mpsc::UnboundedSender<SubmitEvent>;

/// Receiver half of the submit event channel.
pub type SubmitEventReceiver = tokio::sync::mpsc::UnboundedReceiver<SubmitEvent>;
