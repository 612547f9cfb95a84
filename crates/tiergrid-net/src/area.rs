//! `AreaNetwork` — connectivity inside one computing infrastructure.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use tiergrid_core::DeviceId;

use crate::error::{NetError, NetResult};
use crate::link::{LinkQuality, ordered_pair};

/// Standard internal bandwidth (Mbit/s) when none is configured.
pub const STD_INTERNAL_BANDWIDTH: i64 = 100;
/// Standard external bandwidth (Mbit/s) when none is configured.
pub const STD_EXTERNAL_BANDWIDTH: i64 = 100;

/// The network serving the device set of one cloud or edge cluster.
///
/// Link quality is derived from the topology: a routed network with a
/// gateway forms a star (every device one hop from the gateway), a flat
/// network is a full mesh at one hop. Explicit [`AreaNetwork::link`]
/// calls override the derived quality per pair, which is how
/// heterogeneous edge distances are modeled.
#[derive(Debug, Clone)]
pub struct AreaNetwork {
    members: BTreeSet<DeviceId>,
    internal_bandwidth: i64,
    external_bandwidth: i64,
    is_routed: bool,
    gateway: Option<DeviceId>,
    overrides: BTreeMap<(DeviceId, DeviceId), LinkQuality>,
}

impl AreaNetwork {
    /// Network over `members` with the standard configuration
    /// (100 Mbit/s internal and external, routed, no gateway).
    pub fn new(members: impl IntoIterator<Item = DeviceId>) -> Self {
        Self {
            members: members.into_iter().collect(),
            internal_bandwidth: STD_INTERNAL_BANDWIDTH,
            external_bandwidth: STD_EXTERNAL_BANDWIDTH,
            is_routed: true,
            gateway: None,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_internal_bandwidth(mut self, bandwidth: i64) -> Self {
        self.internal_bandwidth = bandwidth;
        self
    }

    pub fn with_external_bandwidth(mut self, bandwidth: i64) -> Self {
        self.external_bandwidth = bandwidth;
        self
    }

    pub fn routed(mut self, is_routed: bool) -> Self {
        self.is_routed = is_routed;
        self
    }

    /// Declare `gateway` as the access point of this network.
    pub fn with_gateway(mut self, gateway: impl Into<DeviceId>) -> Self {
        self.gateway = Some(gateway.into());
        self
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn contains(&self, device: &str) -> bool {
        self.members.contains(device)
    }

    pub fn internal_bandwidth(&self) -> i64 {
        self.internal_bandwidth
    }

    /// Bandwidth of the uplink leaving this network.
    pub fn external_bandwidth(&self) -> i64 {
        self.external_bandwidth
    }

    pub fn is_routed(&self) -> bool {
        self.is_routed
    }

    pub fn gateway(&self) -> Option<&str> {
        self.gateway.as_deref()
    }

    /// Record an explicit link, overriding the derived quality for the
    /// pair. Both endpoints must be members.
    pub fn link(&mut self, a: &str, b: &str, quality: LinkQuality) -> NetResult<()> {
        if a == b {
            return Err(NetError::SelfLink(a.to_string()));
        }
        for endpoint in [a, b] {
            if !self.members.contains(endpoint) {
                return Err(NetError::UnknownMember(endpoint.to_string()));
            }
        }
        debug!(a, b, bandwidth = quality.bandwidth, hops = quality.hops, "link recorded");
        self.overrides.insert(ordered_pair(a, b), quality);
        Ok(())
    }

    /// Link quality between two member devices, derived from the
    /// topology unless an explicit link overrides it.
    pub fn quality(&self, a: &str, b: &str) -> Option<LinkQuality> {
        if a == b || !self.members.contains(a) || !self.members.contains(b) {
            return None;
        }
        if let Some(quality) = self.overrides.get(&ordered_pair(a, b)) {
            return Some(*quality);
        }
        let hops = match (&self.gateway, self.is_routed) {
            (Some(gateway), true) if a == gateway || b == gateway => 1,
            (Some(_), true) => 2,
            _ => 1,
        };
        Some(LinkQuality::new(self.internal_bandwidth, hops))
    }

    /// Hop distance between two member devices.
    pub fn hops(&self, a: &str, b: &str) -> Option<u32> {
        self.quality(a, b).map(|q| q.hops)
    }

    /// Hop distance from `device` to the network's access point.
    ///
    /// `None` when no gateway is declared or the device is unknown.
    /// This is the metric the edge tie-break consumes.
    pub fn hops_to_gateway(&self, device: &str) -> Option<u32> {
        let gateway = self.gateway.as_deref()?;
        if !self.members.contains(device) {
            return None;
        }
        if device == gateway {
            return Some(0);
        }
        self.hops(device, gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(members: &[&str]) -> AreaNetwork {
        AreaNetwork::new(members.iter().map(|m| m.to_string()))
    }

    #[test]
    fn flat_network_is_one_hop_mesh() {
        let net = network(&["a", "b", "c"]).routed(false);

        assert_eq!(net.hops("a", "b"), Some(1));
        assert_eq!(net.hops("b", "c"), Some(1));
        assert_eq!(net.quality("a", "c").unwrap().bandwidth, STD_INTERNAL_BANDWIDTH);
    }

    #[test]
    fn routed_network_goes_through_the_gateway() {
        let net = network(&["gw", "a", "b"]).with_gateway("gw");

        assert_eq!(net.hops("a", "gw"), Some(1));
        assert_eq!(net.hops("a", "b"), Some(2));
        assert_eq!(net.hops_to_gateway("gw"), Some(0));
        assert_eq!(net.hops_to_gateway("a"), Some(1));
    }

    #[test]
    fn explicit_link_overrides_derived_quality() {
        let mut net = network(&["gw", "far"]).with_gateway("gw");
        net.link("far", "gw", LinkQuality::new(10, 4)).unwrap();

        assert_eq!(net.hops_to_gateway("far"), Some(4));
        assert_eq!(net.quality("far", "gw").unwrap().bandwidth, 10);
    }

    #[test]
    fn link_rejects_unknown_members_and_self_links() {
        let mut net = network(&["a", "b"]);

        assert!(matches!(
            net.link("a", "ghost", LinkQuality::new(1, 1)),
            Err(NetError::UnknownMember(_))
        ));
        assert!(matches!(
            net.link("a", "a", LinkQuality::new(1, 1)),
            Err(NetError::SelfLink(_))
        ));
    }

    #[test]
    fn no_gateway_means_no_hop_metric() {
        let net = network(&["a", "b"]);
        assert_eq!(net.hops_to_gateway("a"), None);
    }
}
