use std::path::PathBuf;
use std::sync::Arc;

use euterpe_core::table;
use euterpe_types::TaggedRecord;
use tokio::sync::RwLock;

use crate::stats::Dataset;

const TAG_COLUMNS: [&str; 3] = ["year", "song", "tags"];

/// Tagged snapshot, read once on first use and held until reloaded
pub struct DatasetCache {
    snapshot: PathBuf,
    loaded: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new(snapshot: PathBuf) -> Self {
        Self {
            snapshot,
            loaded: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> anyhow::Result<Arc<Dataset>> {
        if let Some(data) = self.loaded.read().await.as_ref() {
            return Ok(Arc::clone(data));
        }

        let mut slot = self.loaded.write().await;
        // another request may have filled it while we waited
        if let Some(data) = slot.as_ref() {
            return Ok(Arc::clone(data));
        }

        let data = Arc::new(self.read_snapshot().await?);
        *slot = Some(Arc::clone(&data));
        Ok(data)
    }

    /// Drop the cached dataset and read the snapshot again
    pub async fn reload(&self) -> anyhow::Result<Arc<Dataset>> {
        let mut slot = self.loaded.write().await;
        let data = Arc::new(self.read_snapshot().await?);
        *slot = Some(Arc::clone(&data));
        Ok(data)
    }

    async fn read_snapshot(&self) -> anyhow::Result<Dataset> {
        let path = self.snapshot.clone();
        let records = tokio::task::spawn_blocking(move || {
            table::read_jsonl::<TaggedRecord>(&path, &TAG_COLUMNS)
        })
        .await??;

        let data = Dataset::from_records(records);
        tracing::info!(
            songs = data.songs.len(),
            "Loaded dashboard snapshot {}",
            self.snapshot.display()
        );
        Ok(data)
    }
}
