//! Infrastructure factories — configuration in, deployable scope out.
//!
//! A factory resolves its options once into an immutable base
//! configuration. Per-call overrides are merged over the base
//! functionally: the merge produces a fresh configuration for that one
//! call and the stored base is never touched, so later calls see the
//! original defaults. The merge treats every recognized option the same
//! way.

use tracing::info;

use tiergrid_core::{Device, DeviceId};
use tiergrid_net::{AreaNetwork, area};
use tiergrid_placement::{ComputingInfrastructure, DomainOrchestrator, ScopeKind, TieBreakPolicy};

use crate::error::{FactoryError, FactoryResult};

/// Options accepted by the infrastructure factories.
///
/// `devices` is required at factory construction; everything else has a
/// documented default. The same struct doubles as the per-call override
/// set, where every field is optional and `None` means "keep the base".
#[derive(Debug, Clone, Default)]
pub struct FactoryOptions {
    /// The devices of the infrastructure. Required.
    pub devices: Option<Vec<Device>>,
    /// Pre-built network; skips network creation when present.
    pub network: Option<AreaNetwork>,
    /// Pre-built orchestrator; skips network and orchestrator creation.
    /// The orchestrator brings its own devices and network, which then
    /// define the infrastructure's scope.
    pub orchestrator: Option<DomainOrchestrator>,
    /// Tie-break policy override for a created orchestrator. Ignored
    /// when a pre-built orchestrator is given.
    pub policy: Option<TieBreakPolicy>,
    /// Intra-infrastructure bandwidth in Mbit/s. Default 100.
    pub internal_bandwidth: Option<i64>,
    /// Uplink bandwidth in Mbit/s. Default 100.
    pub external_bandwidth: Option<i64>,
    /// Whether traffic is routed through a gateway. Default true.
    pub is_routed: Option<bool>,
    /// Access-point device. Default none.
    pub gateway: Option<DeviceId>,
}

/// A factory's resolved, immutable base configuration.
#[derive(Debug, Clone)]
struct FactoryConfig {
    devices: Vec<Device>,
    network: Option<AreaNetwork>,
    orchestrator: Option<DomainOrchestrator>,
    policy: Option<TieBreakPolicy>,
    internal_bandwidth: i64,
    external_bandwidth: i64,
    is_routed: bool,
    gateway: Option<DeviceId>,
}

impl FactoryConfig {
    fn resolve(options: FactoryOptions) -> FactoryResult<Self> {
        let devices = options
            .devices
            .ok_or(FactoryError::MissingRequiredOption("devices"))?;
        let config = Self {
            devices,
            network: options.network,
            orchestrator: options.orchestrator,
            policy: options.policy,
            internal_bandwidth: options
                .internal_bandwidth
                .unwrap_or(area::STD_INTERNAL_BANDWIDTH),
            external_bandwidth: options
                .external_bandwidth
                .unwrap_or(area::STD_EXTERNAL_BANDWIDTH),
            is_routed: options.is_routed.unwrap_or(true),
            gateway: options.gateway,
        };
        config.validate()?;
        Ok(config)
    }

    /// A fresh configuration with `overrides` applied over this base.
    /// Symmetric across every option; the base is left untouched.
    fn merged(&self, overrides: &FactoryOptions) -> FactoryResult<Self> {
        let config = Self {
            devices: overrides.devices.clone().unwrap_or_else(|| self.devices.clone()),
            network: overrides.network.clone().or_else(|| self.network.clone()),
            orchestrator: overrides
                .orchestrator
                .clone()
                .or_else(|| self.orchestrator.clone()),
            policy: overrides.policy.or(self.policy),
            internal_bandwidth: overrides
                .internal_bandwidth
                .unwrap_or(self.internal_bandwidth),
            external_bandwidth: overrides
                .external_bandwidth
                .unwrap_or(self.external_bandwidth),
            is_routed: overrides.is_routed.unwrap_or(self.is_routed),
            gateway: overrides.gateway.clone().or_else(|| self.gateway.clone()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> FactoryResult<()> {
        if let Some(gateway) = &self.gateway {
            if !self.devices.iter().any(|d| d.id() == gateway) {
                return Err(FactoryError::UnknownGateway(gateway.clone()));
            }
        }
        Ok(())
    }

    fn into_instance(self, id: &str, scope: ScopeKind) -> ComputingInfrastructure {
        let Self {
            devices,
            network,
            orchestrator,
            policy,
            internal_bandwidth,
            external_bandwidth,
            is_routed,
            gateway,
        } = self;

        // A pre-built orchestrator carries its own devices and network;
        // nothing is created around it.
        if let Some(orchestrator) = orchestrator {
            let instance = ComputingInfrastructure::new(id, orchestrator);
            info!(
                infrastructure = %instance.id(),
                scope = %instance.scope(),
                devices = instance.devices().len(),
                "computing infrastructure created around pre-built orchestrator"
            );
            return instance;
        }

        let network = network.unwrap_or_else(|| {
            let mut network = AreaNetwork::new(devices.iter().map(|d| d.id().to_string()))
                .with_internal_bandwidth(internal_bandwidth)
                .with_external_bandwidth(external_bandwidth)
                .routed(is_routed);
            if let Some(gateway) = gateway {
                network = network.with_gateway(gateway);
            }
            network
        });

        let mut orchestrator = match scope {
            ScopeKind::Cloud => DomainOrchestrator::cloud(devices, network),
            ScopeKind::Edge => DomainOrchestrator::edge(devices, network),
        };
        if let Some(policy) = policy {
            orchestrator = orchestrator.with_policy(policy);
        }

        let instance = ComputingInfrastructure::new(id, orchestrator);
        info!(
            infrastructure = %instance.id(),
            %scope,
            devices = instance.devices().len(),
            "computing infrastructure created"
        );
        instance
    }
}

/// Creates `ComputingInfrastructure` instances from declarative options.
pub trait ComputingInfrastructureFactory {
    /// Create one infrastructure named `id`.
    ///
    /// `overrides` replace the factory's stored configuration for this
    /// single call only; subsequent calls without overrides use the
    /// factory's original configuration.
    fn create_computing_instance(
        &self,
        id: &str,
        overrides: Option<&FactoryOptions>,
    ) -> FactoryResult<ComputingInfrastructure>;
}

/// Factory for cloud-scope infrastructures.
#[derive(Debug, Clone)]
pub struct CloudFactory {
    config: FactoryConfig,
}

impl CloudFactory {
    pub fn new(options: FactoryOptions) -> FactoryResult<Self> {
        Ok(Self {
            config: FactoryConfig::resolve(options)?,
        })
    }
}

impl ComputingInfrastructureFactory for CloudFactory {
    fn create_computing_instance(
        &self,
        id: &str,
        overrides: Option<&FactoryOptions>,
    ) -> FactoryResult<ComputingInfrastructure> {
        let config = match overrides {
            Some(overrides) => self.config.merged(overrides)?,
            None => self.config.clone(),
        };
        Ok(config.into_instance(id, ScopeKind::Cloud))
    }
}

/// Factory for edge-scope infrastructures.
///
/// Same options as [`CloudFactory`]; the created orchestrator uses the
/// gateway-aware tie-break unless a policy override says otherwise.
#[derive(Debug, Clone)]
pub struct EdgeFactory {
    config: FactoryConfig,
}

impl EdgeFactory {
    pub fn new(options: FactoryOptions) -> FactoryResult<Self> {
        Ok(Self {
            config: FactoryConfig::resolve(options)?,
        })
    }
}

impl ComputingInfrastructureFactory for EdgeFactory {
    fn create_computing_instance(
        &self,
        id: &str,
        overrides: Option<&FactoryOptions>,
    ) -> FactoryResult<ComputingInfrastructure> {
        let config = match overrides {
            Some(overrides) => self.config.merged(overrides)?,
            None => self.config.clone(),
        };
        Ok(config.into_instance(id, ScopeKind::Edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiergrid_resource::{ResourceDescriptor, ResourceProfile};

    fn device(id: &str, mem: i64) -> Device {
        Device::new(id, ResourceProfile::new().with(ResourceDescriptor::memory(mem)))
    }

    fn base_options() -> FactoryOptions {
        FactoryOptions {
            devices: Some(vec![device("d1", 8), device("d2", 8)]),
            ..Default::default()
        }
    }

    #[test]
    fn missing_devices_fails_construction() {
        let err = CloudFactory::new(FactoryOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            FactoryError::MissingRequiredOption("devices")
        ));
    }

    #[test]
    fn defaults_follow_the_standard_values() {
        let factory = CloudFactory::new(base_options()).unwrap();
        let cloud = factory.create_computing_instance("cloud-0", None).unwrap();

        assert_eq!(cloud.network().internal_bandwidth(), 100);
        assert_eq!(cloud.network().external_bandwidth(), 100);
        assert!(cloud.network().is_routed());
        assert_eq!(cloud.network().gateway(), None);
        assert_eq!(cloud.scope(), ScopeKind::Cloud);
        assert_eq!(cloud.devices().len(), 2);
    }

    #[test]
    fn overrides_apply_to_one_call_only() {
        let factory = CloudFactory::new(base_options()).unwrap();

        let overridden = factory
            .create_computing_instance(
                "special",
                Some(&FactoryOptions {
                    devices: Some(vec![device("solo", 4)]),
                    internal_bandwidth: Some(400),
                    ..Default::default()
                }),
            )
            .unwrap();
        assert_eq!(overridden.devices().len(), 1);
        assert_eq!(overridden.network().internal_bandwidth(), 400);

        // The base configuration is unchanged.
        let plain = factory.create_computing_instance("plain", None).unwrap();
        assert_eq!(plain.devices().len(), 2);
        assert_eq!(plain.network().internal_bandwidth(), 100);
    }

    #[test]
    fn gateway_must_be_a_configured_device() {
        let options = FactoryOptions {
            gateway: Some("ghost".to_string()),
            ..base_options()
        };
        assert!(matches!(
            CloudFactory::new(options),
            Err(FactoryError::UnknownGateway(_))
        ));

        // Same check when an override swaps the devices out from under
        // a valid base gateway.
        let factory = CloudFactory::new(FactoryOptions {
            gateway: Some("d1".to_string()),
            ..base_options()
        })
        .unwrap();
        let result = factory.create_computing_instance(
            "broken",
            Some(&FactoryOptions {
                devices: Some(vec![device("other", 4)]),
                ..Default::default()
            }),
        );
        assert!(matches!(result, Err(FactoryError::UnknownGateway(_))));
    }

    #[test]
    fn prebuilt_network_skips_creation() {
        let network = AreaNetwork::new(["d1".to_string(), "d2".to_string()])
            .with_internal_bandwidth(999);
        let factory = CloudFactory::new(FactoryOptions {
            network: Some(network),
            ..base_options()
        })
        .unwrap();

        let cloud = factory.create_computing_instance("cloud-0", None).unwrap();
        assert_eq!(cloud.network().internal_bandwidth(), 999);
    }

    #[test]
    fn prebuilt_orchestrator_skips_creation() {
        let own_devices = vec![device("own-d0", 32)];
        let network = AreaNetwork::new(own_devices.iter().map(|d| d.id().to_string()));
        let orchestrator = DomainOrchestrator::cloud(own_devices, network);

        let factory = CloudFactory::new(FactoryOptions {
            orchestrator: Some(orchestrator),
            ..base_options()
        })
        .unwrap();
        let cloud = factory.create_computing_instance("cloud-0", None).unwrap();

        // The orchestrator's own scope wins over the factory's devices.
        assert_eq!(cloud.devices().len(), 1);
        assert_eq!(cloud.devices()[0].id(), "own-d0");
    }

    #[test]
    fn edge_factory_uses_the_gateway_tie_break() {
        let factory = EdgeFactory::new(FactoryOptions {
            gateway: Some("d1".to_string()),
            ..base_options()
        })
        .unwrap();
        let edge = factory.create_computing_instance("edge-0", None).unwrap();

        assert_eq!(edge.scope(), ScopeKind::Edge);
        assert_eq!(
            edge.orchestrator().policy(),
            TieBreakPolicy::NearestGateway
        );
        assert_eq!(edge.network().gateway(), Some("d1"));
    }

    #[test]
    fn policy_override_reaches_the_orchestrator() {
        let factory = EdgeFactory::new(FactoryOptions {
            policy: Some(TieBreakPolicy::MostFreeHeadroom),
            ..base_options()
        })
        .unwrap();
        let edge = factory.create_computing_instance("edge-0", None).unwrap();

        assert_eq!(
            edge.orchestrator().policy(),
            TieBreakPolicy::MostFreeHeadroom
        );
    }
}
