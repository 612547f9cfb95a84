//! The continuum builder — three steps, ordered by construction.
//!
//! Orchestrator creation needs the network to exist, and continuum
//! assembly needs both. Each step therefore consumes the previous
//! step's builder and returns the next one, so the required order
//! `create_network` → `create_orchestrator` → `create_continuum` is the
//! only order that type-checks; there is no out-of-order state to
//! detect at runtime.

use tracing::info;

use tiergrid_net::{ContinuumNetwork, TopologyStrategy};
use tiergrid_placement::{ComputingContinuum, ComputingInfrastructure, ContinuumOrchestrator};

use crate::error::{FactoryError, FactoryResult};

/// Step 1 of 3: holds the infrastructures the continuum will span.
#[derive(Debug)]
pub struct ContinuumBuilder {
    infrastructures: Vec<ComputingInfrastructure>,
}

impl ContinuumBuilder {
    /// Start building over `infrastructures`. At least one is required.
    pub fn new(infrastructures: Vec<ComputingInfrastructure>) -> FactoryResult<Self> {
        if infrastructures.is_empty() {
            return Err(FactoryError::MissingRequiredOption(
                "computing_continuum_resources",
            ));
        }
        Ok(Self { infrastructures })
    }

    /// Create the continuum network and link the infrastructures per
    /// `strategy`.
    pub fn create_network(self, strategy: TopologyStrategy) -> NetworkedBuilder {
        let mut network =
            ContinuumNetwork::new(self.infrastructures.iter().map(|i| i.id().to_string()));
        network.link_all(strategy);
        NetworkedBuilder {
            infrastructures: self.infrastructures,
            network,
        }
    }
}

/// Step 2 of 3: the network exists; the orchestrator can be created.
#[derive(Debug)]
pub struct NetworkedBuilder {
    infrastructures: Vec<ComputingInfrastructure>,
    network: ContinuumNetwork,
}

impl NetworkedBuilder {
    pub fn create_orchestrator(self) -> OrchestratedBuilder {
        OrchestratedBuilder {
            orchestrator: ContinuumOrchestrator::new(self.infrastructures, self.network),
        }
    }
}

/// Step 3 of 3: everything exists; assemble the continuum.
#[derive(Debug)]
pub struct OrchestratedBuilder {
    orchestrator: ContinuumOrchestrator,
}

impl OrchestratedBuilder {
    pub fn create_continuum(self) -> ComputingContinuum {
        let continuum = ComputingContinuum::new(self.orchestrator);
        info!(
            infrastructures = continuum.infrastructures().len(),
            "computing continuum assembled"
        );
        continuum
    }
}

/// The director: run the three build steps in their required order.
pub fn construct(
    infrastructures: Vec<ComputingInfrastructure>,
    strategy: TopologyStrategy,
) -> FactoryResult<ComputingContinuum> {
    Ok(ContinuumBuilder::new(infrastructures)?
        .create_network(strategy)
        .create_orchestrator()
        .create_continuum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiergrid_core::Device;
    use tiergrid_net::AreaNetwork;
    use tiergrid_placement::DomainOrchestrator;
    use tiergrid_resource::{ResourceDescriptor, ResourceProfile};

    fn infrastructure(id: &str) -> ComputingInfrastructure {
        let devices = vec![Device::new(
            format!("{id}-d0"),
            ResourceProfile::new().with(ResourceDescriptor::memory(8)),
        )];
        let network = AreaNetwork::new(devices.iter().map(|d| d.id().to_string()));
        ComputingInfrastructure::new(id, DomainOrchestrator::cloud(devices, network))
    }

    #[test]
    fn builder_links_every_infrastructure_pair() {
        let continuum = construct(
            vec![infrastructure("a"), infrastructure("b"), infrastructure("c")],
            TopologyStrategy::default(),
        )
        .unwrap();

        let network = continuum.network();
        assert!(network.is_linked("a", "b"));
        assert!(network.is_linked("a", "c"));
        assert!(network.is_linked("b", "c"));
        assert_eq!(continuum.infrastructures().len(), 3);
    }

    #[test]
    fn empty_resource_set_fails_the_first_step() {
        assert!(matches!(
            ContinuumBuilder::new(Vec::new()),
            Err(FactoryError::MissingRequiredOption(
                "computing_continuum_resources"
            ))
        ));
    }

    #[test]
    fn stepwise_build_matches_the_director() {
        let continuum = ContinuumBuilder::new(vec![infrastructure("solo")])
            .unwrap()
            .create_network(TopologyStrategy::default())
            .create_orchestrator()
            .create_continuum();

        assert_eq!(continuum.infrastructures().len(), 1);
        assert!(continuum.network().strategy().is_some());
    }
}
