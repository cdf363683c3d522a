//! Domain identifiers (strongly-typed IDs).
//!
//! ULID ベースの ID を Phantom type で型ごとに区別します。
//!
//! - **RunId**: 1 回の収集ラン（ログの span に付与）
//! - **SampleId**: 結果ストアに書き込む 1 レコード
//!
//! ULID は時刻でソート可能で、調整なしに生成できます。
//! 直列化は ULID 文字列そのもの（プレフィックスなし）です。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"run-", "sample-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は実行時にはメモリを消費しないマーカーです。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Run のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Run {}

impl IdMarker for Run {
    fn prefix() -> &'static str {
        "run-"
    }
}

/// Sample のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sample {}

impl IdMarker for Sample {
    fn prefix() -> &'static str {
        "sample-"
    }
}

/// Identifier of one collection run.
pub type RunId = Id<Run>;

/// Identifier of one persisted commute sample.
pub type SampleId = Id<Sample>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_type_prefix() {
        let ulid = Ulid::new();
        let run = RunId::from_ulid(ulid);
        let sample = SampleId::from_ulid(ulid);

        assert_eq!(run.to_string(), format!("run-{ulid}"));
        assert_eq!(sample.to_string(), format!("sample-{ulid}"));

        // let _: RunId = sample; // <- does not compile
    }

    #[test]
    fn serializes_as_bare_ulid_string() {
        let ulid = Ulid::new();
        let id = SampleId::from_ulid(ulid);

        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(ulid.to_string()));

        let back: SampleId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<RunId>(), size_of::<Ulid>());
        assert_eq!(size_of::<SampleId>(), 16);
    }
}
