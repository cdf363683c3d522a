//! File-backed adapters.
//!
//! - **JsonFileLocationStore**: JSON 配列のファイルからロケーションを読む
//! - **JsonLinesSampleStore**: 1 レコード 1 行の JSON Lines に追記する

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, OnceCell};

use crate::domain::{CommuteSample, Location, StoreError};
use crate::ports::{LocationStore, SampleStore};

/// JsonFileLocationStore は呼ばれるたびにファイル全体を読み直す
#[derive(Debug, Clone)]
pub struct JsonFileLocationStore {
    path: PathBuf,
}

impl JsonFileLocationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LocationStore for JsonFileLocationStore {
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let locations = serde_json::from_slice(&bytes)?;
        Ok(locations)
    }
}

/// JsonLinesSampleStore は追記専用
///
/// ファイルは最初の put で append モードで開く（なければ作る）。
/// 1 件も書かないランはファイルを作らない。
/// 並行 put でも行が混ざらないように、書き込みはファイルハンドルの Mutex で直列化する。
#[derive(Debug)]
pub struct JsonLinesSampleStore {
    path: PathBuf,
    file: OnceCell<Mutex<File>>,
}

impl JsonLinesSampleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: OnceCell::new(),
        }
    }

    async fn file(&self) -> Result<&Mutex<File>, StoreError> {
        self.file
            .get_or_try_init(|| async {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)
                    .await?;
                Ok::<_, StoreError>(Mutex::new(file))
            })
            .await
    }
}

#[async_trait]
impl SampleStore for JsonLinesSampleStore {
    async fn put(&self, sample: &CommuteSample) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(sample)?;
        line.push(b'\n');

        let mut file = self.file().await?.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommutePair, Measurement, SampleId};
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;
    use ulid::Ulid;

    fn sample(origin: &str) -> CommuteSample {
        let pair = CommutePair::new(
            Location::dwelling(origin, format!("{origin},0")),
            Location::workplace("Office", "9,9"),
        );
        let mut measurement = Measurement::new();
        measurement.insert("duration".into(), json!({ "value": 600 }));
        pair.into_sample(SampleId::from_ulid(Ulid::new()), Utc::now(), measurement)
    }

    #[tokio::test]
    async fn reads_locations_from_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");
        std::fs::write(
            &path,
            r#"[
                {"name":"Home","coordinates":"33.964915,-118.363236","isWorkPlace":false},
                {"name":"Office","coordinates":"34.032860,-118.458040","isWorkPlace":true}
            ]"#,
        )
        .unwrap();

        let store = JsonFileLocationStore::new(&path);
        let locations = store.list_locations().await.unwrap();

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[1], Location::workplace("Office", "34.032860,-118.458040"));
    }

    #[tokio::test]
    async fn missing_location_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLocationStore::new(dir.path().join("nope.json"));

        let err = store.list_locations().await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[tokio::test]
    async fn garbage_location_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileLocationStore::new(&path)
            .list_locations()
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[tokio::test]
    async fn concurrent_puts_write_whole_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");
        let store = Arc::new(JsonLinesSampleStore::new(&path));

        let mut joins = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            joins.push(tokio::spawn(async move {
                store.put(&sample(&format!("home{i}"))).await.unwrap();
            }));
        }
        for j in joins {
            j.await.unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 16);
        for line in lines {
            let back: CommuteSample = serde_json::from_str(line).unwrap();
            assert_eq!(back.measurement["duration"]["value"], json!(600));
        }
    }

    #[tokio::test]
    async fn reopening_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");

        JsonLinesSampleStore::new(&path)
            .put(&sample("a"))
            .await
            .unwrap();
        JsonLinesSampleStore::new(&path)
            .put(&sample("b"))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[tokio::test]
    async fn sample_file_is_created_on_first_put() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");

        let store = JsonLinesSampleStore::new(&path);
        assert!(!path.exists());

        store.put(&sample("a")).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn unopenable_sample_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLinesSampleStore::new(dir.path().join("missing").join("samples.jsonl"));

        let err = store.put(&sample("a")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
