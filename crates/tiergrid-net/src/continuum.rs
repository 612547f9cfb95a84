//! `ContinuumNetwork` — connectivity between whole infrastructures.

use std::collections::BTreeMap;

use tracing::{debug, info};

use tiergrid_core::InfrastructureId;

use crate::error::{NetError, NetResult};
use crate::link::{LinkQuality, ordered_pair};
use crate::strategy::TopologyStrategy;

/// Pairwise links between the computing infrastructures of a continuum.
///
/// Built by the continuum builder: members are registered first, then
/// [`ContinuumNetwork::link_all`] applies a [`TopologyStrategy`].
#[derive(Debug, Clone)]
pub struct ContinuumNetwork {
    /// Enumeration order of members is preserved; it is the order the
    /// continuum orchestrator visits infrastructures in.
    members: Vec<InfrastructureId>,
    links: BTreeMap<(InfrastructureId, InfrastructureId), LinkQuality>,
    strategy: Option<TopologyStrategy>,
}

impl ContinuumNetwork {
    pub fn new(members: impl IntoIterator<Item = InfrastructureId>) -> Self {
        Self {
            members: members.into_iter().collect(),
            links: BTreeMap::new(),
            strategy: None,
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn contains(&self, infrastructure: &str) -> bool {
        self.members.iter().any(|m| m == infrastructure)
    }

    /// The strategy used by the last `link_all`, if any.
    pub fn strategy(&self) -> Option<&TopologyStrategy> {
        self.strategy.as_ref()
    }

    /// Record one explicit inter-infrastructure link.
    pub fn link(&mut self, a: &str, b: &str, quality: LinkQuality) -> NetResult<()> {
        if a == b {
            return Err(NetError::SelfLink(a.to_string()));
        }
        for endpoint in [a, b] {
            if !self.contains(endpoint) {
                return Err(NetError::UnknownMember(endpoint.to_string()));
            }
        }
        debug!(a, b, bandwidth = quality.bandwidth, "infrastructures linked");
        self.links.insert(ordered_pair(a, b), quality);
        Ok(())
    }

    /// Link every member pair according to `strategy`.
    pub fn link_all(&mut self, strategy: TopologyStrategy) {
        match &strategy {
            TopologyStrategy::Clique(cfg) => {
                for i in 0..self.members.len() {
                    for j in (i + 1)..self.members.len() {
                        let pair = ordered_pair(&self.members[i], &self.members[j]);
                        self.links
                            .insert(pair, LinkQuality::new(cfg.link_bandwidth, 1));
                    }
                }
            }
        }
        info!(
            members = self.members.len(),
            links = self.links.len(),
            "continuum topology linked"
        );
        self.strategy = Some(strategy);
    }

    pub fn quality(&self, a: &str, b: &str) -> Option<LinkQuality> {
        self.links.get(&ordered_pair(a, b)).copied()
    }

    pub fn hops(&self, a: &str, b: &str) -> Option<u32> {
        self.quality(a, b).map(|q| q.hops)
    }

    pub fn is_linked(&self, a: &str, b: &str) -> bool {
        self.quality(a, b).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::CliqueConfig;

    fn network(members: &[&str]) -> ContinuumNetwork {
        ContinuumNetwork::new(members.iter().map(|m| m.to_string()))
    }

    #[test]
    fn clique_links_every_pair() {
        let mut net = network(&["cloud", "edge-east", "edge-west"]);
        net.link_all(TopologyStrategy::default());

        assert!(net.is_linked("cloud", "edge-east"));
        assert!(net.is_linked("cloud", "edge-west"));
        assert!(net.is_linked("edge-east", "edge-west"));
        assert_eq!(net.hops("cloud", "edge-east"), Some(1));
    }

    #[test]
    fn clique_uses_configured_bandwidth() {
        let mut net = network(&["a", "b"]);
        net.link_all(TopologyStrategy::Clique(CliqueConfig { link_bandwidth: 40 }));

        assert_eq!(net.quality("a", "b").unwrap().bandwidth, 40);
        assert!(net.strategy().is_some());
    }

    #[test]
    fn unlinked_members_have_no_quality() {
        let net = network(&["a", "b"]);
        assert!(!net.is_linked("a", "b"));
        assert_eq!(net.quality("a", "b"), None);
    }

    #[test]
    fn link_rejects_unknown_members() {
        let mut net = network(&["a"]);
        assert!(matches!(
            net.link("a", "ghost", LinkQuality::new(1, 1)),
            Err(NetError::UnknownMember(_))
        ));
    }
}
