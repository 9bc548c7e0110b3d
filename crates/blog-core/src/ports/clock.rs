use chrono::{DateTime, Duration, Utc};

/// Source of record timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Timestamp for an update of a record last touched at `previous`.
    ///
    /// Never earlier than one microsecond after `previous`, so `updated_at`
    /// strictly increases across updates and stays at or after `created_at`.
    fn next_after(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        self.now().max(previous + Duration::microseconds(1))
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
