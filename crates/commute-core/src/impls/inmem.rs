//! In-memory adapters for the store ports (tests / demos).

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CommuteSample, Location, StoreError};
use crate::ports::{LocationStore, SampleStore};

/// InMemoryLocationStore は固定のロケーション一覧を返す
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocationStore {
    locations: Vec<Location>,
}

impl InMemoryLocationStore {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }
}

#[async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.locations.clone())
    }
}

/// InMemorySampleStore は書き込まれた順にレコードを保持する
#[derive(Debug, Default)]
pub struct InMemorySampleStore {
    samples: Mutex<Vec<CommuteSample>>,
}

impl InMemorySampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn samples(&self) -> Vec<CommuteSample> {
        self.samples.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.samples.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.samples.lock().await.is_empty()
    }
}

#[async_trait]
impl SampleStore for InMemorySampleStore {
    async fn put(&self, sample: &CommuteSample) -> Result<(), StoreError> {
        self.samples.lock().await.push(sample.clone());
        Ok(())
    }
}
