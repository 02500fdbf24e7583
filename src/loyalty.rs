//! Loyalty tiers derived from accumulated miles.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Blue,
    Silver,
    Gold,
    Platinum,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Blue => "Blue",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        };
        f.write_str(label)
    }
}

pub const PLATINUM_MILES: i64 = 100_000;

/// Maps a mileage balance to its tier.
///
/// The ranges are 0-9,999 Blue, 10,000-59,999 Silver, 60,000-99,999 Gold and
/// exactly 100,000 Platinum. Anything outside 0..=100,000 has no tier: the
/// caller gets `None` and a warning is logged.
pub fn tier_for_miles(miles: i64) -> Option<Tier> {
    match miles {
        0..=9_999 => Some(Tier::Blue),
        10_000..=59_999 => Some(Tier::Silver),
        60_000..=99_999 => Some(Tier::Gold),
        PLATINUM_MILES => Some(Tier::Platinum),
        _ => {
            warn!(miles, "Miles balance outside every loyalty tier");
            None
        }
    }
}
