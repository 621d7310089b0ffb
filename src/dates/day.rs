use chrono::{DateTime, TimeZone};

/// True when both timestamps fall on the same calendar day, each read in
/// its own time zone.
pub fn matches_day<A: TimeZone, B: TimeZone>(now: &DateTime<A>, check: &DateTime<B>) -> bool {
    now.date_naive() == check.date_naive()
}
