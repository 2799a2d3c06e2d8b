use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::error;
use uuid::Uuid;

use crate::models::Entry;
use crate::validate::now_iso;

/// What a read returns. A missing record is an empty collection with no
/// revision.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub entries: Vec<Entry>,
    pub revision: Option<String>,
    pub updated_at: Option<String>,
}

/// Stamped by the store on every successful write.
#[derive(Debug, Clone)]
pub struct PutReceipt {
    pub revision: String,
    pub updated_at: String,
}

#[derive(Debug)]
pub enum StoreError {
    /// The caller's revision token is stale; nothing was written.
    Conflict { current: Option<String> },
    /// The store is unreachable or rejected the request for another reason.
    Transport(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Conflict { current } => match current {
                Some(current) => write!(f, "revision mismatch, store is at {current}"),
                None => write!(f, "revision mismatch"),
            },
            StoreError::Transport(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// The blob store contract: one record, read and replaced whole, guarded by
/// an opaque revision token with compare-and-swap semantics. A `put` with no
/// expected revision always wins.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self) -> Result<StoreSnapshot, StoreError>;
    async fn put(
        &self,
        entries: &[Entry],
        expected_revision: Option<&str>,
    ) -> Result<PutReceipt, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// On-disk shape of the record.
#[derive(Debug, Serialize, Deserialize)]
struct BlobRecord {
    version: u32,
    year: i32,
    revision: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
    entries: Vec<Entry>,
}

/// File-backed store: one JSON document plus its revision token. The write
/// lock makes compare-and-swap atomic within the process.
pub struct FileStore {
    path: PathBuf,
    year: i32,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, year: i32) -> Self {
        Self {
            path: path.into(),
            year,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_record(&self) -> Result<Option<BlobRecord>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(record) => Ok(Some(record)),
                Err(err) => {
                    error!("failed to parse store file: {err}");
                    Ok(None)
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl BlobStore for FileStore {
    async fn get(&self) -> Result<StoreSnapshot, StoreError> {
        Ok(match self.read_record().await? {
            Some(record) => StoreSnapshot {
                entries: record.entries,
                revision: Some(record.revision),
                updated_at: Some(record.updated_at),
            },
            None => StoreSnapshot::default(),
        })
    }

    async fn put(
        &self,
        entries: &[Entry],
        expected_revision: Option<&str>,
    ) -> Result<PutReceipt, StoreError> {
        let _guard = self.write_lock.lock().await;

        let current = self.read_record().await?.map(|record| record.revision);
        if let (Some(expected), Some(current)) = (expected_revision, current.as_deref()) {
            if expected != current {
                return Err(StoreError::Conflict {
                    current: Some(current.to_string()),
                });
            }
        }

        let record = BlobRecord {
            version: 1,
            year: self.year,
            revision: Uuid::new_v4().to_string(),
            updated_at: now_iso(),
            entries: entries.to_vec(),
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let payload = serde_json::to_vec_pretty(&record)?;
        fs::write(&self.path, payload).await?;

        Ok(PutReceipt {
            revision: record.revision,
            updated_at: record.updated_at,
        })
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
