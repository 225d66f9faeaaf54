use serde::Deserialize;
use std::path::PathBuf;

const SECONDS_IN_MINUTE: f32 = 60.0;
const SECONDS_IN_HOUR: f32 = 60.0 * SECONDS_IN_MINUTE;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavepointUnit {
    Frames,
    Seconds,
    Minutes,
    Hours,
}

/// Screenshot request that fires once, after a frame count or elapsed render time.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Savepoint {
    path: PathBuf,
    time: f32,
    unit: SavepointUnit,
    #[serde(skip)]
    saved: bool,
}

impl Savepoint {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, time: f32, unit: SavepointUnit) -> Self {
        Self { path: path.into(), time, unit, saved: false }
    }

    #[must_use]
    pub fn ready_to_save(&self, elapsed_seconds: f32, frame_count: u32) -> bool {
        if self.saved {
            return false;
        }
        match self.unit {
            SavepointUnit::Frames => frame_count as f32 >= self.time,
            SavepointUnit::Seconds => elapsed_seconds >= self.time,
            SavepointUnit::Minutes => elapsed_seconds >= self.time * SECONDS_IN_MINUTE,
            SavepointUnit::Hours => elapsed_seconds >= self.time * SECONDS_IN_HOUR,
        }
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
    }

    #[must_use]
    pub fn saved(&self) -> bool {
        self.saved
    }

    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
