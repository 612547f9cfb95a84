//! `DomainOrchestrator` — device-level placement inside one scope.
//!
//! Placement per service runs in three steps, in the order services are
//! presented (the first service has first claim under contention):
//!
//! 1. **Candidate filtering** — keep devices whose entire capacity
//!    profile satisfies the requirements; a device missing a required
//!    kind is not a candidate.
//! 2. **Image locality** — partition candidates by whether the image is
//!    already local. An image hosted by no device in the scope makes the
//!    service unplaceable here: resolving a pull path from outside the
//!    scope is an extension hook, not implemented.
//! 3. **Commit** — the tie-break policy picks one candidate, preferring
//!    image-local devices, and the device's descriptors shrink by the
//!    requirement amounts atomically.

use tracing::{debug, info, warn};

use tiergrid_core::{Application, Device, DeviceId, Microservice};
use tiergrid_net::AreaNetwork;
use tiergrid_resource::{ResourceKind, ResourceProfile};

use crate::orchestrator::{Orchestrator, ScopeKind};
use crate::policy::TieBreakPolicy;
use crate::report::DeploymentReport;

/// Places microservices onto the devices of one cloud or edge scope.
///
/// Owns its devices and network exclusively: nothing outside this
/// orchestrator mutates their resource state, which is what keeps
/// independent infrastructures safe to simulate in parallel. Candidate
/// filtering never leaves the scope's device set.
#[derive(Debug, Clone)]
pub struct DomainOrchestrator {
    scope: ScopeKind,
    devices: Vec<Device>,
    network: AreaNetwork,
    policy: TieBreakPolicy,
}

impl DomainOrchestrator {
    /// Cloud-scope orchestrator with the default headroom tie-break.
    pub fn cloud(devices: Vec<Device>, network: AreaNetwork) -> Self {
        Self {
            scope: ScopeKind::Cloud,
            devices,
            network,
            policy: TieBreakPolicy::MostFreeHeadroom,
        }
    }

    /// Edge-scope orchestrator; prefers devices nearer the gateway.
    pub fn edge(devices: Vec<Device>, network: AreaNetwork) -> Self {
        Self {
            scope: ScopeKind::Edge,
            devices,
            network,
            policy: TieBreakPolicy::NearestGateway,
        }
    }

    /// Override the tie-break policy.
    pub fn with_policy(mut self, policy: TieBreakPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn scope(&self) -> ScopeKind {
        self.scope
    }

    pub fn policy(&self) -> TieBreakPolicy {
        self.policy
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id() == id)
    }

    pub fn network(&self) -> &AreaNetwork {
        &self.network
    }

    /// Total free capacity for `kind` across the scope.
    pub fn aggregate_free(&self, kind: ResourceKind) -> i64 {
        self.devices.iter().map(|d| d.capacity().free(kind)).sum()
    }

    /// Cheap admission pre-check: could the scope's aggregate capacity
    /// cover the service? Necessary, not sufficient — a single device
    /// must still fit the whole requirement at placement time.
    pub fn admits(&self, service: &Microservice) -> bool {
        service
            .requirements
            .iter()
            .all(|(kind, need)| self.aggregate_free(*kind) >= need.value())
    }

    /// Place every service of `services`, in order. Same semantics as
    /// [`Orchestrator::deploy`] for callers holding a bare service set.
    pub fn deploy_services(&mut self, services: &[Microservice]) -> DeploymentReport {
        let mut report = DeploymentReport::new();
        for service in services {
            match self.place_service(service) {
                Some(device) => report.push_placed(service.id.clone(), device),
                None => report.push_unplaceable(service.id.clone()),
            }
        }
        report
    }

    /// Restore a service's claim on `device` (placement teardown).
    ///
    /// Returns false when the device is not in this scope.
    pub fn release(&mut self, device: &str, requirements: &ResourceProfile) -> bool {
        match self.devices.iter_mut().find(|d| d.id() == device) {
            Some(device) => {
                device.capacity_mut().release(requirements);
                true
            }
            None => false,
        }
    }

    /// Devices whose entire capacity profile satisfies `service`.
    fn candidates(&self, service: &Microservice) -> Vec<usize> {
        (0..self.devices.len())
            .filter(|&i| self.devices[i].capacity().satisfies(&service.requirements))
            .collect()
    }

    /// Indices of devices hosting `image` locally, across the whole
    /// scope. The locality hook for the commit step.
    fn image_hosts(&self, image: &str) -> Vec<usize> {
        (0..self.devices.len())
            .filter(|&i| self.devices[i].hosts_image(image))
            .collect()
    }

    fn place_service(&mut self, service: &Microservice) -> Option<DeviceId> {
        let candidates = self.candidates(service);
        if candidates.is_empty() {
            warn!(
                scope = %self.scope,
                service = %service.id,
                "no device satisfies the requirements"
            );
            return None;
        }

        let hosts = self.image_hosts(&service.image.name);
        if hosts.is_empty() {
            // The image would have to be pulled from outside the scope.
            // That resolution path is an extension hook; here the
            // service is unplaceable.
            warn!(
                scope = %self.scope,
                service = %service.id,
                image = %service.image,
                "image not hosted anywhere in scope"
            );
            return None;
        }

        // Prefer candidates that already hold the image; fall back to
        // any candidate (the image transfers from an in-scope host).
        let local: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|i| hosts.contains(i))
            .collect();
        let pool = if local.is_empty() { &candidates } else { &local };
        debug!(
            scope = %self.scope,
            service = %service.id,
            candidates = candidates.len(),
            image_local = local.len(),
            "candidates resolved"
        );

        let chosen = self
            .policy
            .pick(&self.devices, pool, &service.requirements, &self.network)?;
        let device = &mut self.devices[chosen];
        if !device.capacity_mut().claim(&service.requirements) {
            // Candidates were filtered against the live profile, so a
            // failed claim means the filter and the commit disagree.
            warn!(
                scope = %self.scope,
                service = %service.id,
                device = %device.id(),
                "claim failed after candidate filtering"
            );
            return None;
        }

        info!(
            scope = %self.scope,
            service = %service.id,
            device = %device.id(),
            "service placed"
        );
        Some(device.id().to_string())
    }
}

impl Orchestrator for DomainOrchestrator {
    fn deploy(&mut self, app: &Application) -> DeploymentReport {
        let report = self.deploy_services(&app.services);
        info!(
            scope = %self.scope,
            application = %app.name,
            placed = report.placed_count(),
            requested = app.len(),
            "deployment evaluated"
        );
        report
    }
}
