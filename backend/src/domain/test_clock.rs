//! Deterministic clock shared by domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// A clock frozen at a fixed instant, returned with that instant.
pub(crate) fn fixed_clock() -> (Arc<dyn Clock>, DateTime<Utc>) {
    let utc_now = Utc
        .with_ymd_and_hms(2026, 10, 15, 8, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    (Arc::new(FixtureClock { utc_now }), utc_now)
}
