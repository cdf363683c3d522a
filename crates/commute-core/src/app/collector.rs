//! CommuteCollector - 1 回の収集ラン
//!
//! # フロー
//! 1. LocationStore から全ロケーションを読む（失敗したらランを打ち切る）
//! 2. ローカル時刻で向きを決め、ペアの直積を作る
//! 3. ペアごとに DistanceMatrix へ問い合わせる（並行）
//! 4. 成功したペアだけ CommuteSample にして SampleStore に書く（並行）
//!
//! 3 と 4 の失敗はペア単位でログに出すだけで、兄弟には影響しない。リトライはしない。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::stream::{self, StreamExt};
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::planner::{CommutePlan, DayPart};
use super::report::RunReport;
use crate::domain::{
    CollectorError, CommutePair, CommuteSample, DistanceMatrixResponse, Location, RunId,
};
use crate::ports::{
    Clock, DistanceMatrix, IdGenerator, LocationStore, SampleStore, SystemClock, UlidGenerator,
};

/// Time zone and fan-out limit for a collection run.
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    /// Zone used to decide morning vs. afternoon.
    pub time_zone: Tz,
    /// Cap on concurrent requests (and, separately, concurrent writes).
    /// `None` puts every pair in flight at once.
    pub max_in_flight: Option<usize>,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::America::Los_Angeles,
            max_in_flight: None,
        }
    }
}

/// Loads locations and returns the pairs a run at `now` would query.
///
/// Needs only the location store: no external calls, no writes.
pub async fn plan_commutes(
    locations: &dyn LocationStore,
    now: DateTime<Utc>,
    time_zone: Tz,
) -> Result<CommutePlan, CollectorError> {
    let locations = load_locations(locations).await?;
    Ok(CommutePlan::new(locations, DayPart::at(now, time_zone)))
}

async fn load_locations(store: &dyn LocationStore) -> Result<Vec<Location>, CollectorError> {
    match store.list_locations().await {
        Ok(locations) => {
            debug!(count = locations.len(), "loaded locations");
            Ok(locations)
        }
        Err(e) => {
            let err = CollectorError::SourceRead(e);
            error!(error = %err, "could not load locations, nothing to collect");
            Err(err)
        }
    }
}

pub struct CommuteCollector {
    locations: Arc<dyn LocationStore>,
    matrix: Arc<dyn DistanceMatrix>,
    samples: Arc<dyn SampleStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    settings: CollectorSettings,
}

impl CommuteCollector {
    pub fn new(
        locations: Arc<dyn LocationStore>,
        matrix: Arc<dyn DistanceMatrix>,
        samples: Arc<dyn SampleStore>,
        settings: CollectorSettings,
    ) -> Self {
        Self {
            locations,
            matrix,
            samples,
            clock: Arc::new(SystemClock),
            ids: Arc::new(UlidGenerator::new(SystemClock)),
            settings,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// What a run at the current time would query. See [`plan_commutes`].
    pub async fn plan(&self) -> Result<CommutePlan, CollectorError> {
        plan_commutes(
            self.locations.as_ref(),
            self.clock.now(),
            self.settings.time_zone,
        )
        .await
    }

    /// Runs one collection pass.
    ///
    /// Only a failed location read is returned as an error. Per-pair request
    /// and write failures are logged and counted in the report.
    pub async fn run(&self) -> Result<RunReport, CollectorError> {
        let run_id = self.ids.generate_run_id();
        self.run_inner(run_id)
            .instrument(info_span!("collect", %run_id))
            .await
    }

    async fn run_inner(&self, run_id: RunId) -> Result<RunReport, CollectorError> {
        let collected_at = self.clock.now();
        let day_part = DayPart::at(collected_at, self.settings.time_zone);

        let locations = load_locations(self.locations.as_ref()).await?;
        let plan = CommutePlan::new(locations, day_part);
        info!(
            %day_part,
            origins = plan.origins.len(),
            destinations = plan.destinations.len(),
            pairs = plan.len(),
            "planned commute pairs"
        );

        let pairs = plan.pairs();
        let pairs_planned = pairs.len();
        let limit = self.fan_out_limit(pairs_planned);

        let fetched: Vec<CommuteSample> = stream::iter(pairs)
            .map(|pair| self.fetch(pair, collected_at))
            .buffer_unordered(limit)
            .filter_map(|sample| async move { sample })
            .collect()
            .await;
        info!(
            fetched = fetched.len(),
            failed = pairs_planned - fetched.len(),
            "distance requests finished"
        );

        let written = stream::iter(&fetched)
            .map(|sample| self.write(sample))
            .buffer_unordered(self.fan_out_limit(fetched.len()))
            .filter(|ok| futures::future::ready(*ok))
            .count()
            .await;

        let report = RunReport {
            run_id,
            day_part,
            collected_at,
            origins: plan.origins.len(),
            destinations: plan.destinations.len(),
            pairs_planned,
            fetched: fetched.len(),
            fetch_failures: pairs_planned - fetched.len(),
            written,
            write_failures: fetched.len() - written,
        };
        info!(
            written = report.written,
            write_failures = report.write_failures,
            "collection run finished"
        );
        Ok(report)
    }

    fn fan_out_limit(&self, len: usize) -> usize {
        self.settings.max_in_flight.unwrap_or(len).max(1)
    }

    async fn fetch(&self, pair: CommutePair, collected_at: DateTime<Utc>) -> Option<CommuteSample> {
        let result = self
            .matrix
            .query(&pair.origin.coordinates, &pair.destination.coordinates)
            .await
            .and_then(DistanceMatrixResponse::into_measurement);

        match result {
            Ok(measurement) => {
                let id = self.ids.generate_sample_id();
                Some(pair.into_sample(id, collected_at, measurement))
            }
            Err(source) => {
                let label = pair.label();
                let err = CollectorError::ExternalCall {
                    key: pair.key(),
                    source,
                };
                warn!(%label, error = %err, "skipping pair");
                None
            }
        }
    }

    async fn write(&self, sample: &CommuteSample) -> bool {
        match self.samples.put(sample).await {
            Ok(()) => {
                debug!(key = %sample.key, id = %sample.id, "sample written");
                true
            }
            Err(source) => {
                let err = CollectorError::SinkWrite {
                    key: sample.key.clone(),
                    source,
                };
                error!(id = %sample.id, error = %err, "sample write failed");
                false
            }
        }
    }
}
