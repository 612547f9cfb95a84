//! Topology strategies — how continuum members get linked.

use serde::{Deserialize, Serialize};

/// How to link the infrastructures of a continuum.
///
/// The variant set is the extension point; today every continuum is a
/// clique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TopologyStrategy {
    /// Every pair of infrastructures directly linked. Default.
    Clique(CliqueConfig),
}

impl Default for TopologyStrategy {
    fn default() -> Self {
        Self::Clique(CliqueConfig::default())
    }
}

/// Configuration for clique linking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliqueConfig {
    /// Bandwidth of each pairwise link in Mbit/s.
    pub link_bandwidth: i64,
}

impl Default for CliqueConfig {
    fn default() -> Self {
        Self { link_bandwidth: 100 }
    }
}
