//! DistanceMatrix port - 外部の distance-matrix サービス
//!
//! 1 リクエスト = 1 ペア。レスポンスの検証は
//! [`DistanceMatrixResponse::into_measurement`] が行う。

use async_trait::async_trait;

use crate::domain::{Coordinates, DistanceMatrixResponse, MatrixError};

/// DistanceMatrix は origin → destination の所要時間を問い合わせる
///
/// transport エラーと non-200 はここで `MatrixError` になる。
/// 200 で返ったボディの `status` は呼び出し側が見る。
#[async_trait]
pub trait DistanceMatrix: Send + Sync {
    async fn query(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<DistanceMatrixResponse, MatrixError>;
}
