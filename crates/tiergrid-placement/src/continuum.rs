//! Continuum-scope orchestration — delegation across infrastructures.

use tracing::{debug, info, warn};

use tiergrid_core::{Application, DeviceId, InfrastructureId, Microservice};
use tiergrid_net::ContinuumNetwork;

use crate::infrastructure::ComputingInfrastructure;
use crate::orchestrator::Orchestrator;
use crate::report::{DeploymentReport, ServiceOutcome};

/// Coordinates deployment across a set of computing infrastructures.
///
/// For each service: a cheap admission pre-check over aggregate
/// capacity narrows the infrastructures worth asking, then placement is
/// delegated to each admitting infrastructure's own orchestrator in
/// enumeration order until one commits. Device state is mutated only
/// through the delegated call; the infrastructure that governs a device
/// stays its single owner.
#[derive(Debug, Clone)]
pub struct ContinuumOrchestrator {
    infrastructures: Vec<ComputingInfrastructure>,
    network: ContinuumNetwork,
}

impl ContinuumOrchestrator {
    pub fn new(
        infrastructures: Vec<ComputingInfrastructure>,
        network: ContinuumNetwork,
    ) -> Self {
        Self {
            infrastructures,
            network,
        }
    }

    pub fn infrastructures(&self) -> &[ComputingInfrastructure] {
        &self.infrastructures
    }

    pub fn infrastructure(&self, id: &str) -> Option<&ComputingInfrastructure> {
        self.infrastructures.iter().find(|i| i.id() == id)
    }

    pub fn network(&self) -> &ContinuumNetwork {
        &self.network
    }

    fn place_service(&mut self, service: &Microservice) -> Option<(InfrastructureId, DeviceId)> {
        let admitting: Vec<usize> = (0..self.infrastructures.len())
            .filter(|&i| self.infrastructures[i].admits(service))
            .collect();
        if admitting.is_empty() {
            warn!(service = %service.id, "no infrastructure admits the service");
            return None;
        }
        debug!(
            service = %service.id,
            admitting = admitting.len(),
            "admission pre-check passed"
        );

        for idx in admitting {
            let infrastructure = &mut self.infrastructures[idx];
            let report = infrastructure.deploy_services(std::slice::from_ref(service));
            match report.records().first().map(|r| &r.outcome) {
                Some(ServiceOutcome::Placed { device }) => {
                    return Some((infrastructure.id().to_string(), device.clone()));
                }
                _ => {
                    // Admitted on aggregate capacity, but no single
                    // device fit. Try the next infrastructure.
                    debug!(
                        service = %service.id,
                        infrastructure = %infrastructure.id(),
                        "delegated placement failed, trying next"
                    );
                }
            }
        }
        None
    }
}

impl Orchestrator for ContinuumOrchestrator {
    fn deploy(&mut self, app: &Application) -> DeploymentReport {
        let mut report = DeploymentReport::new();
        for service in &app.services {
            match self.place_service(service) {
                Some((infrastructure, device)) => {
                    info!(
                        application = %app.name,
                        service = %service.id,
                        %infrastructure,
                        %device,
                        "service placed via delegation"
                    );
                    report.push_placed(service.id.clone(), device);
                }
                None => report.push_unplaceable(service.id.clone()),
            }
        }
        info!(
            application = %app.name,
            placed = report.placed_count(),
            requested = app.len(),
            "continuum deployment evaluated"
        );
        report
    }
}

/// The whole multi-tier aggregation under one top-level orchestrator.
#[derive(Debug, Clone)]
pub struct ComputingContinuum {
    orchestrator: ContinuumOrchestrator,
}

impl ComputingContinuum {
    pub fn new(orchestrator: ContinuumOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &ContinuumOrchestrator {
        &self.orchestrator
    }

    pub fn infrastructures(&self) -> &[ComputingInfrastructure] {
        self.orchestrator.infrastructures()
    }

    pub fn infrastructure(&self, id: &str) -> Option<&ComputingInfrastructure> {
        self.orchestrator.infrastructure(id)
    }

    pub fn network(&self) -> &ContinuumNetwork {
        self.orchestrator.network()
    }
}

impl Orchestrator for ComputingContinuum {
    fn deploy(&mut self, app: &Application) -> DeploymentReport {
        self.orchestrator.deploy(app)
    }
}
