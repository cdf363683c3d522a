//! Impls - ports の実装
//!
//! - **InMemoryLocationStore / InMemorySampleStore**: テスト・デモ用
//! - **JsonFileLocationStore / JsonLinesSampleStore**: ファイルベース
//! - **GoogleDistanceMatrix**: Distance Matrix API の HTTP クライアント

pub mod google;
pub mod inmem;
pub mod json_file;

pub use self::google::{DEFAULT_ENDPOINT, GoogleDistanceMatrix, Units};
pub use self::inmem::{InMemoryLocationStore, InMemorySampleStore};
pub use self::json_file::{JsonFileLocationStore, JsonLinesSampleStore};
