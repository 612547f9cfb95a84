//! Enumerated resource dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;

/// A dimension of device capacity.
///
/// Descriptors are only comparable and combinable within one kind;
/// the kind is the unit of the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Main memory, in megabytes.
    MemoryAmount,
    /// Network bandwidth, in megabits per second.
    NetworkBandwidth,
    /// Processing capacity, in abstract compute units.
    ComputingCapacity,
    /// Persistent storage, in megabytes.
    Storage,
}

impl ResourceKind {
    /// All kinds, in canonical order.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::MemoryAmount,
        ResourceKind::NetworkBandwidth,
        ResourceKind::ComputingCapacity,
        ResourceKind::Storage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::MemoryAmount => "memory",
            ResourceKind::NetworkBandwidth => "bandwidth",
            ResourceKind::ComputingCapacity => "compute",
            ResourceKind::Storage => "storage",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResourceKind {
    type Err = ResourceError;

    /// Accepts the short label (`memory`) and the long config name
    /// (`memory_amount`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" | "memory_amount" => Ok(ResourceKind::MemoryAmount),
            "bandwidth" | "network_bandwidth" => Ok(ResourceKind::NetworkBandwidth),
            "compute" | "computing_capacity" => Ok(ResourceKind::ComputingCapacity),
            "storage" => Ok(ResourceKind::Storage),
            other => Err(ResourceError::UnknownKind(other.to_string())),
        }
    }
}
