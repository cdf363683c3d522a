//! LocationStore port - 登録済みロケーションの読み取り（read-only）

use async_trait::async_trait;

use crate::domain::{Location, StoreError};

/// LocationStore は登録済みの全ロケーションを返す
///
/// フィルタはしない。ページングもしない（全件が 1 回で返る前提）。
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError>;
}
