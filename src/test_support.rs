//! Test utilities shared by unit tests and the integration tests in `tests/`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use mockable::Clock;

/// Clock pinned to noon on a given date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    fn noon(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN) + TimeDelta::hours(12)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.noon()
            .and_local_timezone(Local)
            .earliest()
            .unwrap_or_else(|| self.utc().with_timezone(&Local))
    }

    fn utc(&self) -> DateTime<Utc> {
        self.noon().and_utc()
    }
}
