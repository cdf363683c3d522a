//! App - ports を組み合わせた収集ジョブ
//!
//! - **planner**: ペアの決定（純粋関数）
//! - **collector**: 1 回の収集ラン
//! - **report**: ランの集計

pub mod collector;
pub mod planner;
pub mod report;

pub use self::collector::{CollectorSettings, CommuteCollector, plan_commutes};
pub use self::planner::{CommutePlan, DayPart, Partition};
pub use self::report::RunReport;
