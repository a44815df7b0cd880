//! Top-level driver for the ingestion side of the process.

use crate::listener::{ListenerOptions, SessionListener};
use crate::transport::Transport;
use msgvault_core::AccountConfig;
use msgvault_store::Repository;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Starts one [`SessionListener`] task per registered account and runs
/// them concurrently and independently.
///
/// Failure policy: a terminated listener is logged and not restarted;
/// sibling listeners and the search API continue unaffected. Task results
/// are observed through the join set rather than propagated across task
/// boundaries.
pub struct IngestionSupervisor<T: Transport> {
    transport: Arc<T>,
    repo: Arc<Repository>,
    options: ListenerOptions,
}

impl<T: Transport> IngestionSupervisor<T> {
    pub fn new(transport: Arc<T>, repo: Arc<Repository>, options: ListenerOptions) -> Self {
        Self {
            transport,
            repo,
            options,
        }
    }

    /// Run listeners for all accounts until every one has terminated.
    ///
    /// `shutdown` fans out to each listener; in-flight writes complete
    /// before the corresponding task exits.
    pub async fn run(self, accounts: Vec<AccountConfig>, shutdown: CancellationToken) {
        let mut tasks = JoinSet::new();

        for account in accounts {
            let label = account.label.clone();
            let listener = SessionListener::new(
                account,
                Arc::clone(&self.transport),
                Arc::clone(&self.repo),
                self.options.clone(),
            );
            let token = shutdown.clone();
            tasks.spawn(async move { (label, listener.run(token).await) });
        }

        info!(listeners = tasks.len(), "ingestion supervisor started");

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((label, Ok(()))) => info!(account = %label, "listener stopped"),
                Ok((label, Err(err))) => {
                    error!(account = %label, error = %err, "listener terminated")
                }
                Err(err) => error!(error = %err, "listener task panicked"),
            }
        }

        info!("ingestion supervisor stopped");
    }
}
