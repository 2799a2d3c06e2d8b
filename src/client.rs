use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};
use tracing::warn;

use crate::exchange::merge_import;
use crate::models::{Entry, ImportSummary};
use crate::storage::{BlobStore, StoreError, StoreSnapshot};

/// Bounds on every store call. The defaults keep the protocol's no-auto-retry
/// behavior while making a hung store impossible.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retries: 0,
            backoff: Duration::from_millis(250),
        }
    }
}

#[derive(Debug)]
pub enum SaveError {
    /// The store moved on under us. Local state has been reloaded from the
    /// store and the unsaved delta is gone.
    Conflict,
    Transport(String),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Conflict => {
                write!(f, "stored data changed elsewhere, local changes were discarded")
            }
            SaveError::Transport(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for SaveError {}

#[derive(Debug, Default)]
struct LocalState {
    entries: Vec<Entry>,
    revision: Option<String>,
    updated_at: Option<String>,
}

/// The persistence client: owns the in-memory collection plus the last known
/// revision. One mutex serializes every operation, so at most one save or
/// reload is in flight; later requests queue behind it and never interleave.
///
/// Saves send the full collection with the last known revision. On conflict
/// the store wins: local state is reloaded and the unsaved delta dropped. On
/// a transport failure the delta stays in memory, unsaved, and rides along
/// with the next save.
pub struct StoreClient {
    store: Arc<dyn BlobStore>,
    policy: RetryPolicy,
    state: Mutex<LocalState>,
}

impl StoreClient {
    pub fn new(store: Arc<dyn BlobStore>, policy: RetryPolicy) -> Self {
        Self {
            store,
            policy,
            state: Mutex::new(LocalState::default()),
        }
    }

    /// The collection as currently held in memory. No store round trip.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock().await;
        snapshot_of(&state)
    }

    /// Fetch the store unconditionally and replace all local state. Used at
    /// startup, after a conflict and after a clear.
    pub async fn reload(&self) -> Result<StoreSnapshot, SaveError> {
        let mut state = self.state.lock().await;
        self.reload_locked(&mut state).await?;
        Ok(snapshot_of(&state))
    }

    /// Persist whatever is in memory, including any delta left behind by an
    /// earlier transport failure.
    pub async fn save(&self) -> Result<StoreSnapshot, SaveError> {
        let mut state = self.state.lock().await;
        self.persist_locked(&mut state).await?;
        Ok(snapshot_of(&state))
    }

    /// Append and save. An existing entry with the same id is replaced whole;
    /// ids stay unique within the collection.
    pub async fn add_entry(&self, entry: Entry) -> Result<StoreSnapshot, SaveError> {
        let mut state = self.state.lock().await;
        match state.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => *slot = entry,
            None => state.entries.push(entry),
        }
        self.persist_locked(&mut state).await?;
        Ok(snapshot_of(&state))
    }

    /// Remove by id and save. `None` when the id is unknown; nothing is
    /// written in that case.
    pub async fn remove_entry(&self, id: &str) -> Result<Option<StoreSnapshot>, SaveError> {
        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state.entries.retain(|e| e.id != id);
        if state.entries.len() == before {
            return Ok(None);
        }
        self.persist_locked(&mut state).await?;
        Ok(Some(snapshot_of(&state)))
    }

    pub async fn import(
        &self,
        records: Vec<Value>,
        year: i32,
    ) -> Result<(ImportSummary, StoreSnapshot), SaveError> {
        let mut state = self.state.lock().await;
        let (merged, summary) = merge_import(&state.entries, records, year);
        state.entries = merged;
        self.persist_locked(&mut state).await?;
        Ok((summary, snapshot_of(&state)))
    }

    /// Delete the persisted record entirely, then reload. Ends with an empty
    /// collection and no revision.
    pub async fn clear(&self) -> Result<StoreSnapshot, SaveError> {
        let mut state = self.state.lock().await;
        self.with_retry(|| self.store.clear()).await?;
        self.reload_locked(&mut state).await?;
        Ok(snapshot_of(&state))
    }

    async fn reload_locked(&self, state: &mut LocalState) -> Result<(), SaveError> {
        let snapshot = self.with_retry(|| self.store.get()).await?;
        state.entries = snapshot.entries;
        state.revision = snapshot.revision;
        state.updated_at = snapshot.updated_at;
        Ok(())
    }

    async fn persist_locked(&self, state: &mut LocalState) -> Result<(), SaveError> {
        let entries = state.entries.clone();
        let expected = state.revision.clone();
        match self
            .with_retry(|| self.store.put(&entries, expected.as_deref()))
            .await
        {
            Ok(receipt) => {
                state.revision = Some(receipt.revision);
                state.updated_at = Some(receipt.updated_at);
                Ok(())
            }
            Err(SaveError::Conflict) => {
                warn!("save rejected with a stale revision, reloading from store");
                if let Err(err) = self.reload_locked(state).await {
                    warn!("reload after conflict failed: {err}");
                }
                Err(SaveError::Conflict)
            }
            Err(err) => Err(err),
        }
    }

    /// Run one store call under the configured timeout, retrying transport
    /// failures up to the configured count. Conflicts are never retried.
    async fn with_retry<T, F, Fut>(&self, mut op: F) -> Result<T, SaveError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let mut attempt = 0;
        loop {
            let result = match timeout(self.policy.timeout, op()).await {
                Ok(result) => result,
                Err(_) => Err(StoreError::Transport(format!(
                    "store call timed out after {}ms",
                    self.policy.timeout.as_millis()
                ))),
            };
            match result {
                Ok(value) => return Ok(value),
                Err(StoreError::Conflict { .. }) => return Err(SaveError::Conflict),
                Err(StoreError::Transport(message)) => {
                    if attempt >= self.policy.retries {
                        return Err(SaveError::Transport(message));
                    }
                    attempt += 1;
                    warn!(
                        "store call failed ({message}), retry {attempt}/{}",
                        self.policy.retries
                    );
                    sleep(self.policy.backoff).await;
                }
            }
        }
    }
}

fn snapshot_of(state: &LocalState) -> StoreSnapshot {
    StoreSnapshot {
        entries: state.entries.clone(),
        revision: state.revision.clone(),
        updated_at: state.updated_at.clone(),
    }
}
