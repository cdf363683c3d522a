//! Ports - 抽象化レイヤー
//!
//! 収集ジョブが触る外部システムをすべて trait にしておく。
//!
//! - **LocationStore**: ロケーションの読み取り元
//! - **DistanceMatrix**: 外部の所要時間サービス
//! - **SampleStore**: 結果の書き込み先
//! - **Clock / IdGenerator**: 時刻と ID（テストで差し替える）

pub mod clock;
pub mod distance_matrix;
pub mod id_generator;
pub mod location_store;
pub mod sample_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::distance_matrix::DistanceMatrix;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::location_store::LocationStore;
pub use self::sample_store::SampleStore;
