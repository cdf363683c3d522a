//! SampleStore port - 結果ストアへの書き込み（write-only）

use async_trait::async_trait;

use crate::domain::{CommuteSample, StoreError};

/// SampleStore は 1 呼び出しにつき 1 レコードを書く
///
/// read-modify-write はしない。他の書き込みとの順序保証もない。
#[async_trait]
pub trait SampleStore: Send + Sync {
    async fn put(&self, sample: &CommuteSample) -> Result<(), StoreError>;
}
