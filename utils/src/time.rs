//! Relative time formatting for transaction lists.

use dpos_types::{NetworkTimestamp, Timestamp};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 12 * MONTH;

/// Describe how long ago a network timestamp was, relative to `now`.
///
/// Each unit is the floor of elapsed seconds divided by the unit length, and
/// the coarser unit takes over as soon as its floor reaches one (exactly 60
/// minutes reads "1 hour ago"). Months are 30 days and years 360 days.
/// Timestamps in the future read as "0 sec ago".
pub fn humanize_elapsed(timestamp: NetworkTimestamp, now: Timestamp) -> String {
    let elapsed = timestamp.to_unix().elapsed_since(now);

    if elapsed < MINUTE {
        return format!("{elapsed} sec ago");
    }
    if elapsed < HOUR {
        return plural(elapsed / MINUTE, "min", "mins");
    }
    if elapsed < DAY {
        return plural(elapsed / HOUR, "hour", "hours");
    }
    if elapsed < MONTH {
        return plural(elapsed / DAY, "day", "days");
    }
    if elapsed < YEAR {
        return plural(elapsed / MONTH, "month", "months");
    }
    plural(elapsed / YEAR, "year", "years")
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n <= 1 {
        format!("{n} {one} ago")
    } else {
        format!("{n} {many} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpos_types::params::NETWORK_EPOCH;

    /// `now` chosen so that a transaction at network time `t` is `elapsed` old.
    fn ago(elapsed: u64) -> String {
        let t = NetworkTimestamp::new(1_000);
        let now = Timestamp::new(NETWORK_EPOCH + 1_000 + elapsed);
        humanize_elapsed(t, now)
    }

    #[test]
    fn seconds() {
        assert_eq!(ago(0), "0 sec ago");
        assert_eq!(ago(59), "59 sec ago");
    }

    #[test]
    fn minutes() {
        assert_eq!(ago(60), "1 min ago");
        assert_eq!(ago(119), "1 min ago");
        assert_eq!(ago(120), "2 mins ago");
        assert_eq!(ago(HOUR - 1), "59 mins ago");
    }

    #[test]
    fn hours_start_exactly_at_sixty_minutes() {
        assert_eq!(ago(HOUR), "1 hour ago");
        assert_eq!(ago(2 * HOUR - 1), "1 hour ago");
        assert_eq!(ago(2 * HOUR), "2 hours ago");
        assert_eq!(ago(DAY - 1), "23 hours ago");
    }

    #[test]
    fn days_months_years() {
        assert_eq!(ago(DAY), "1 day ago");
        assert_eq!(ago(29 * DAY), "29 days ago");
        assert_eq!(ago(30 * DAY), "1 month ago");
        assert_eq!(ago(11 * MONTH), "11 months ago");
        assert_eq!(ago(YEAR), "1 year ago");
        assert_eq!(ago(3 * YEAR + DAY), "3 years ago");
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        let t = NetworkTimestamp::new(5_000);
        let now = Timestamp::new(NETWORK_EPOCH + 10);
        assert_eq!(humanize_elapsed(t, now), "0 sec ago");
    }
}
