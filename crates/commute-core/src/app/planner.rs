//! Planner - どのペアを問い合わせるかを決める（純粋関数のみ）
//!
//! # フロー
//! 1. ロケーションを dwelling / workplace に分ける
//! 2. ローカル時刻で向きを決める（正午前は dwelling → workplace）
//! 3. origin × destination の直積を作る（重複排除はしない）

use std::fmt;

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::domain::{CommutePair, Location};

/// 朝か、それ以外か
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPart {
    Morning,
    Afternoon,
}

impl DayPart {
    /// `now` を `time_zone` のローカル時刻にして、12 時より前なら Morning
    pub fn at(now: DateTime<Utc>, time_zone: Tz) -> Self {
        if now.with_timezone(&time_zone).hour() < 12 {
            DayPart::Morning
        } else {
            DayPart::Afternoon
        }
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPart::Morning => f.write_str("morning"),
            DayPart::Afternoon => f.write_str("afternoon"),
        }
    }
}

/// Locations split by `is_workplace`. Together they are exactly the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub dwellings: Vec<Location>,
    pub workplaces: Vec<Location>,
}

impl Partition {
    pub fn of(locations: Vec<Location>) -> Self {
        let (workplaces, dwellings): (Vec<Location>, Vec<Location>) =
            locations.into_iter().partition(|l| l.is_workplace);
        Self {
            dwellings,
            workplaces,
        }
    }
}

/// Origins and destinations chosen for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommutePlan {
    pub day_part: DayPart,
    pub origins: Vec<Location>,
    pub destinations: Vec<Location>,
}

impl CommutePlan {
    pub fn new(locations: Vec<Location>, day_part: DayPart) -> Self {
        let Partition {
            dwellings,
            workplaces,
        } = Partition::of(locations);

        let (origins, destinations) = match day_part {
            DayPart::Morning => (dwellings, workplaces),
            DayPart::Afternoon => (workplaces, dwellings),
        };

        Self {
            day_part,
            origins,
            destinations,
        }
    }

    /// Number of pairs `pairs()` yields.
    pub fn len(&self) -> usize {
        self.origins.len() * self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full cross product, origin-major.
    pub fn pairs(&self) -> Vec<CommutePair> {
        let mut pairs = Vec::with_capacity(self.len());
        for origin in &self.origins {
            for destination in &self.destinations {
                pairs.push(CommutePair::new(origin.clone(), destination.clone()));
            }
        }
        pairs
    }
}
