//! TOML deployment plans.
//!
//! A plan declares the topology (clouds, edges, their devices) and the
//! applications to run on it. Resource magnitudes are written as
//! strings and validated when the plan is realized: a non-numeric value
//! fails there, at construction, not at placement time. Unrecognized
//! keys are ignored, so older binaries read newer plans.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tiergrid_core::{Application, Device, ImageRef, Microservice};
use tiergrid_net::TopologyStrategy;
use tiergrid_placement::{ComputingContinuum, ComputingInfrastructure};
use tiergrid_resource::{ResourceDescriptor, ResourceKind, ResourceProfile, ResourceResult};

use crate::builder;
use crate::factory::{
    CloudFactory, ComputingInfrastructureFactory, EdgeFactory, FactoryOptions,
};

/// Top-level deployment plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContinuumConfig {
    #[serde(default)]
    pub clouds: Vec<ClusterConfig>,
    #[serde(default)]
    pub edges: Vec<ClusterConfig>,
    /// How to link the infrastructures. Defaults to a clique.
    pub topology: Option<TopologyStrategy>,
    #[serde(default)]
    pub applications: Vec<ApplicationConfig>,
}

/// One cloud or edge cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub name: String,
    pub devices: Vec<DeviceConfig>,
    pub internal_bandwidth: Option<i64>,
    pub external_bandwidth: Option<i64>,
    pub is_routed: Option<bool>,
    pub gateway: Option<String>,
}

/// One device: capacity per kind (textual magnitudes) and local images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub id: String,
    /// Kind name (`memory`, `network_bandwidth`, ...) to magnitude.
    #[serde(default)]
    pub resources: BTreeMap<String, String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// An application to deploy on the continuum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub name: String,
    pub services: Vec<ServiceConfig>,
}

/// One microservice of an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub id: String,
    pub image: String,
    pub version: Option<String>,
    #[serde(default)]
    pub requirements: BTreeMap<String, String>,
}

fn profile_from(magnitudes: &BTreeMap<String, String>) -> ResourceResult<ResourceProfile> {
    magnitudes
        .iter()
        .map(|(kind, raw)| ResourceDescriptor::parse(kind.parse::<ResourceKind>()?, raw))
        .collect()
}

impl DeviceConfig {
    fn realize(&self) -> ResourceResult<Device> {
        let mut device = Device::new(self.id.clone(), profile_from(&self.resources)?);
        for image in &self.images {
            device = device.with_image(image.clone());
        }
        Ok(device)
    }
}

impl ClusterConfig {
    fn factory_options(&self) -> ResourceResult<FactoryOptions> {
        let devices = self
            .devices
            .iter()
            .map(DeviceConfig::realize)
            .collect::<ResourceResult<Vec<_>>>()?;
        Ok(FactoryOptions {
            devices: Some(devices),
            internal_bandwidth: self.internal_bandwidth,
            external_bandwidth: self.external_bandwidth,
            is_routed: self.is_routed,
            gateway: self.gateway.clone(),
            ..Default::default()
        })
    }
}

impl ServiceConfig {
    fn realize(&self) -> ResourceResult<Microservice> {
        let version = self.version.as_deref().unwrap_or("latest");
        Ok(Microservice::new(
            self.id.clone(),
            ImageRef::new(self.image.clone(), version),
            profile_from(&self.requirements)?,
        ))
    }
}

impl ContinuumConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Realize the plan: factories create the infrastructures, the
    /// builder links and assembles the continuum.
    pub fn build(&self) -> anyhow::Result<ComputingContinuum> {
        let mut infrastructures: Vec<ComputingInfrastructure> = Vec::new();

        for cluster in &self.clouds {
            let factory = CloudFactory::new(cluster.factory_options()?)?;
            infrastructures.push(factory.create_computing_instance(&cluster.name, None)?);
        }
        for cluster in &self.edges {
            let factory = EdgeFactory::new(cluster.factory_options()?)?;
            infrastructures.push(factory.create_computing_instance(&cluster.name, None)?);
        }

        let strategy = self.topology.clone().unwrap_or_default();
        Ok(builder::construct(infrastructures, strategy)?)
    }

    /// Realize the applications declared in the plan, in order.
    pub fn applications(&self) -> anyhow::Result<Vec<Application>> {
        self.applications
            .iter()
            .map(|app| {
                let services = app
                    .services
                    .iter()
                    .map(ServiceConfig::realize)
                    .collect::<ResourceResult<Vec<_>>>()?;
                Ok(Application {
                    name: app.name.clone(),
                    services,
                })
            })
            .collect()
    }
}
