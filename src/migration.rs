//! Stage orchestration for one migration run.

use crate::batch::BatchSubmitter;
use crate::config::MigrationConfig;
use crate::lock::ProcessLock;
use crate::resilience::{inter_request_delay, CLERK_USERS_RATE_LIMIT};
use crate::shutdown::Shutdown;
use crate::source::{existing_users, CsvSource};
use crate::transport::{ClerkTransport, UserSink};
use crate::Result;
use std::future::Future;
use std::sync::Arc;

/// Which stages to run.
#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    pub skip_users: bool,
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Interrupted(Shutdown),
}

pub struct Migration {
    config: MigrationConfig,
    sink: Arc<dyn UserSink>,
}

impl Migration {
    /// A migration that talks to the API configured in `config`.
    pub fn new(config: MigrationConfig) -> Result<Self> {
        let transport = ClerkTransport::new(&config)?;
        Ok(Self::with_sink(config, Arc::new(transport)))
    }

    pub fn with_sink(config: MigrationConfig, sink: Arc<dyn UserSink>) -> Self {
        Self { config, sink }
    }

    /// Run every enabled stage while holding the process lock.
    ///
    /// Dropping the returned future releases the lock.
    pub async fn run(&self, options: &MigrationOptions) -> Result<()> {
        let _lock = ProcessLock::acquire(&self.config.lock_file)?;

        let users = if options.skip_users {
            tracing::info!("skipping user migration");
            Vec::new()
        } else {
            existing_users(&CsvSource::in_data_dir(&self.config.data_dir))?
        };

        let delay = inter_request_delay(users.len(), &CLERK_USERS_RATE_LIMIT);
        BatchSubmitter::new(self.sink.clone())
            .submit_batch(&users, delay)
            .await;

        // TODO: migrate properties from the Google Sheet into MongoDB using
        // `mongodb_url` and `service_account_key`.
        tracing::info!("migration finished");
        Ok(())
    }

    /// [`run`](Self::run), abandoned as soon as `shutdown` resolves.
    ///
    /// The lock is released before this returns in either case.
    pub async fn run_until<F>(&self, options: &MigrationOptions, shutdown: F) -> Result<RunOutcome>
    where
        F: Future<Output = Shutdown>,
    {
        let outcome = tokio::select! {
            result = self.run(options) => result.map(|()| RunOutcome::Completed),
            signal = shutdown => Ok(RunOutcome::Interrupted(signal)),
        };
        if let Ok(RunOutcome::Interrupted(signal)) = &outcome {
            tracing::warn!(?signal, "interrupted; users submitted so far remain in Clerk");
        }
        outcome
    }
}
