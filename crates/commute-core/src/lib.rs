//! commute-core
//!
//! 登録済みロケーション間の通勤時間を外部の distance-matrix サービスに問い合わせ、
//! ペアごとに 1 レコードを結果ストアに書き込む収集ジョブ。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, location, sample, matrix, errors）
//! - **ports**: 抽象化レイヤー（LocationStore, DistanceMatrix, SampleStore, Clock, IdGenerator）
//! - **app**: 収集ロジック（planner, collector, report）
//! - **impls**: 実装（InMemory, JSON ファイル, Google Distance Matrix）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
