use chrono::{DateTime, Utc};

use gitstamp_core::{ClockPort, PortError};

/// Wall clock, optionally pinned to a fixed instant for reproducible builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildClockAdapter {
    pinned: Option<DateTime<Utc>>,
}

impl BuildClockAdapter {
    pub fn system() -> Self {
        Self { pinned: None }
    }

    pub fn pinned(at: DateTime<Utc>) -> Self {
        Self { pinned: Some(at) }
    }

    /// Pins to a `SOURCE_DATE_EPOCH`-style unix timestamp in seconds.
    pub fn from_unix_seconds(secs: i64) -> Result<Self, PortError> {
        let at = DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| PortError::Clock(format!("timestamp out of range: {secs}")))?;
        Ok(Self::pinned(at))
    }
}

impl ClockPort for BuildClockAdapter {
    fn now_utc(&self) -> Result<DateTime<Utc>, PortError> {
        Ok(self.pinned.unwrap_or_else(Utc::now))
    }
}
