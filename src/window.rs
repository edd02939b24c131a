//! Guide window calculation
//!
//! The catalog is queried for a rolling window: the current hour plus the
//! next three local midnights, all anchored to the reference timezone so
//! the request bounds and output timestamps carry the right GMT/BST offset.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// The four instants bounding a guide request. `slots[0]` is the current
/// wall-clock time truncated to the top of the hour; `slots[1..=3]` are
/// the next three local midnights.
#[derive(Debug, Clone)]
pub struct GuideWindow {
    pub slots: [DateTime<Tz>; 4],
}

impl GuideWindow {
    pub fn compute(tz: Tz) -> Self {
        Self::compute_at(tz, Utc::now())
    }

    /// Compute the window for a given instant (injectable for tests).
    pub fn compute_at(tz: Tz, now: DateTime<Utc>) -> Self {
        let local = now.with_timezone(&tz);
        let top_of_hour = local
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(local);

        let mut slots = [top_of_hour; 4];
        for day in 1..=3usize {
            slots[day] = midnight(&tz, local.date_naive() + Duration::days(day as i64));
        }
        Self { slots }
    }

    /// Lower bound of the request window.
    pub fn starts_at(&self) -> &DateTime<Tz> {
        &self.slots[0]
    }

    /// Upper bound of the request window (midnight three days out).
    pub fn ends_at(&self) -> &DateTime<Tz> {
        &self.slots[3]
    }
}

/// Resolve local midnight on a date, picking the earlier side of a DST
/// ambiguity and sliding an hour forward if midnight got skipped.
fn midnight(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

/// Catalog timestamp parameter: local wall-clock time with the literal
/// `.000Z` suffix the API expects.
pub fn iso8601(dt: &DateTime<Tz>) -> String {
    format!("{}.000Z", dt.format("%Y-%m-%dT%H:%M:%S"))
}
