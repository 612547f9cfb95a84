//! Link quality between two network members.

use serde::{Deserialize, Serialize};

/// Quality of one link: usable bandwidth and distance in hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkQuality {
    /// Bandwidth in megabits per second.
    pub bandwidth: i64,
    /// Hop count between the two endpoints.
    pub hops: u32,
}

impl LinkQuality {
    pub fn new(bandwidth: i64, hops: u32) -> Self {
        Self { bandwidth, hops }
    }
}

/// Normalize an endpoint pair so symmetric links share one map entry.
pub(crate) fn ordered_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
