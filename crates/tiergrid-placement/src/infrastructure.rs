//! `ComputingInfrastructure` — one deployable scope.

use tiergrid_core::{Application, Device, InfrastructureId, Microservice};
use tiergrid_net::AreaNetwork;
use tiergrid_resource::ResourceKind;

use crate::domain::DomainOrchestrator;
use crate::orchestrator::{Orchestrator, ScopeKind};
use crate::report::DeploymentReport;

/// A cloud or edge cluster: a resource set, its orchestrator, and its
/// network, bound into one scope.
///
/// The orchestrator owns the devices and the network, and the
/// infrastructure owns the orchestrator, so the three can never refer
/// to different resource sets. The device set is fixed at construction;
/// only device resource *state* changes afterwards, and only through
/// `deploy`/`release` on the governing orchestrator.
#[derive(Debug, Clone)]
pub struct ComputingInfrastructure {
    id: InfrastructureId,
    orchestrator: DomainOrchestrator,
}

impl ComputingInfrastructure {
    pub fn new(id: impl Into<InfrastructureId>, orchestrator: DomainOrchestrator) -> Self {
        Self {
            id: id.into(),
            orchestrator,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scope(&self) -> ScopeKind {
        self.orchestrator.scope()
    }

    pub fn devices(&self) -> &[Device] {
        self.orchestrator.devices()
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.orchestrator.device(id)
    }

    pub fn network(&self) -> &AreaNetwork {
        self.orchestrator.network()
    }

    pub fn orchestrator(&self) -> &DomainOrchestrator {
        &self.orchestrator
    }

    /// Total free capacity for `kind` across the infrastructure.
    pub fn aggregate_free(&self, kind: ResourceKind) -> i64 {
        self.orchestrator.aggregate_free(kind)
    }

    /// Whether the aggregate capacity could cover `service`. The
    /// continuum's admission pre-check.
    pub fn admits(&self, service: &Microservice) -> bool {
        self.orchestrator.admits(service)
    }

    /// Device-level placement for a bare service set, delegated to the
    /// governing orchestrator.
    pub fn deploy_services(&mut self, services: &[Microservice]) -> DeploymentReport {
        self.orchestrator.deploy_services(services)
    }
}

impl Orchestrator for ComputingInfrastructure {
    fn deploy(&mut self, app: &Application) -> DeploymentReport {
        self.orchestrator.deploy(app)
    }
}
