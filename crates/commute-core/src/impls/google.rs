//! GoogleDistanceMatrix - Distance Matrix API の HTTP クライアント
//!
//! 1 ペアにつき GET 1 回。リトライはしない。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Coordinates, DistanceMatrixResponse, MatrixError};
use crate::ports::DistanceMatrix;

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Unit system requested from the service (affects the `text` fields only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }
}

pub struct GoogleDistanceMatrix {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    units: Units,
}

impl GoogleDistanceMatrix {
    /// `timeout` が `None` のときはリクエスト単位のタイムアウトなし
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        units: Units,
        timeout: Option<Duration>,
    ) -> Result<Self, MatrixError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| MatrixError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            units,
        })
    }

    fn query_params<'a>(
        &'a self,
        origin: &'a Coordinates,
        destination: &'a Coordinates,
    ) -> [(&'static str, &'a str); 5] {
        [
            ("units", self.units.as_str()),
            ("departure_time", "now"),
            ("origins", origin.as_str()),
            ("destinations", destination.as_str()),
            ("key", self.api_key.as_str()),
        ]
    }
}

#[async_trait]
impl DistanceMatrix for GoogleDistanceMatrix {
    async fn query(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<DistanceMatrixResponse, MatrixError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(origin, destination))
            .send()
            .await
            .map_err(|e| MatrixError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        debug!(%origin, %destination, %status, "distance matrix responded");
        if status != StatusCode::OK {
            return Err(MatrixError::HttpStatus(status.as_u16()));
        }

        response
            .json::<DistanceMatrixResponse>()
            .await
            .map_err(|e| MatrixError::Malformed(e.without_url().to_string()))
    }
}
