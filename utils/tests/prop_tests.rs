use proptest::prelude::*;

use dpos_types::params::NETWORK_EPOCH;
use dpos_types::{NetworkTimestamp, Timestamp};
use dpos_utils::humanize_elapsed;

const UNITS: [&str; 6] = ["sec", "min", "hour", "day", "month", "year"];

fn unit_rank(label: &str) -> usize {
    let unit = label.split(' ').nth(1).unwrap().trim_end_matches('s');
    UNITS.iter().position(|u| *u == unit).unwrap()
}

proptest! {
    /// An older transaction never reads as a finer unit than a newer one.
    #[test]
    fn unit_never_gets_finer_with_age(a in 0u64..200_000_000, b in 0u64..200_000_000) {
        let (young, old) = if a <= b { (a, b) } else { (b, a) };
        let t = NetworkTimestamp::new(0);
        let young = humanize_elapsed(t, Timestamp::new(NETWORK_EPOCH + young));
        let old = humanize_elapsed(t, Timestamp::new(NETWORK_EPOCH + old));
        prop_assert!(unit_rank(&young) <= unit_rank(&old), "{young} vs {old}");
    }

    /// The count is never zero once past the first minute.
    #[test]
    fn count_is_positive_past_a_minute(elapsed in 60u64..1_000_000_000) {
        let label = humanize_elapsed(
            NetworkTimestamp::new(0),
            Timestamp::new(NETWORK_EPOCH + elapsed),
        );
        let n: u64 = label.split(' ').next().unwrap().parse().unwrap();
        prop_assert!(n >= 1, "{label}");
    }
}
