//! Sequential batch submitter.

use crate::transport::{SubmissionFailure, SubmissionOutcome, UserSink};
use crate::types::UserPayload;
use std::sync::Arc;
use std::time::Duration;

/// Sends payloads one at a time, pausing a fixed delay after every attempt.
pub struct BatchSubmitter {
    sink: Arc<dyn UserSink>,
}

impl BatchSubmitter {
    pub fn new(sink: Arc<dyn UserSink>) -> Self {
        Self { sink }
    }

    /// Submit every payload in order. A failed item is logged and skipped;
    /// nothing is returned because outcomes live only in the logs.
    pub async fn submit_batch(&self, payloads: &[UserPayload], delay: Duration) {
        let total = payloads.len();
        tracing::info!(total, delay_ms = delay.as_millis() as u64, "submitting users");

        for (index, payload) in payloads.iter().enumerate() {
            let outcome = self.sink.create_user(payload).await;
            log_outcome(index, total, payload, &outcome);
            // Always honored, including after fast failures.
            tokio::time::sleep(delay).await;
        }
    }
}

fn log_outcome(index: usize, total: usize, payload: &UserPayload, outcome: &SubmissionOutcome) {
    let email = payload.primary_email();
    match outcome {
        SubmissionOutcome::Created(ack) => {
            let user_id = ack.get("id").and_then(|v| v.as_str()).unwrap_or("?");
            tracing::info!(index, total, email, user_id, response = %ack, "added a new user to Clerk");
        }
        SubmissionOutcome::Failed(failure) => {
            tracing::error!(index, total, email, error = %failure, "failed to add new user to Clerk");
            if let SubmissionFailure::Rejected { status, issues } = failure {
                for issue in issues {
                    tracing::error!(
                        index,
                        status,
                        code = %issue.code,
                        params = ?issue.meta.param_names,
                        message = %issue.message,
                        long_message = issue.long_message.as_deref().unwrap_or(""),
                        "rejection detail"
                    );
                }
            }
        }
    }
}
