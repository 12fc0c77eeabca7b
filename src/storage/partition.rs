//! Date-partition path construction.

use chrono::{DateTime, Datelike, Utc};

/// One UTC-day partition, rendered as Hive-style `key=value` path segments.
///
/// The partition is a pure function of the UTC instant it is derived from:
/// the same instant always yields the same path, and any two instants within
/// the same UTC day yield the same path. Partition dates come from the clock
/// at the moment of writing, never from fields inside the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionPath {
    year: i32,
    month: u32,
    day: u32,
}

impl PartitionPath {
    /// Partition for the current UTC day.
    pub fn today() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Partition for the UTC day containing `at`.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
            day: at.day(),
        }
    }

    /// The date segments: `year=<Y>/month=<MM>/day=<DD>`.
    pub fn segments(&self) -> String {
        format!(
            "year={}/month={:02}/day={:02}",
            self.year, self.month, self.day
        )
    }

    /// Full landing prefix for an entity: `raw/<entity>/<segments>`.
    pub fn key_prefix(&self, entity: &str) -> String {
        format!("raw/{entity}/{}", self.segments())
    }
}

impl std::fmt::Display for PartitionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments())
    }
}
