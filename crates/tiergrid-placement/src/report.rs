//! Deployment reports — what `deploy` returns.

use serde::{Deserialize, Serialize};

use tiergrid_core::{DeviceId, ServiceId};

/// Outcome for one requested microservice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceOutcome {
    /// The service was committed onto `device`.
    Placed { device: DeviceId },
    /// No satisfying candidate existed in the orchestrator's scope.
    Unplaceable,
}

/// One service's entry in a deployment report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub service: ServiceId,
    pub outcome: ServiceOutcome,
}

/// Overall result of one `deploy` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentSummary {
    AllPlaced,
    PartiallyPlaced,
    NonePlaced,
}

/// Per-service placement records, in request order.
///
/// A report is always returned, whatever happened: unplaceable services
/// appear as records, they do not abort the remaining services in the
/// same call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentReport {
    records: Vec<PlacementRecord>,
}

impl DeploymentReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_placed(&mut self, service: impl Into<ServiceId>, device: impl Into<DeviceId>) {
        self.records.push(PlacementRecord {
            service: service.into(),
            outcome: ServiceOutcome::Placed {
                device: device.into(),
            },
        });
    }

    pub fn push_unplaceable(&mut self, service: impl Into<ServiceId>) {
        self.records.push(PlacementRecord {
            service: service.into(),
            outcome: ServiceOutcome::Unplaceable,
        });
    }

    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    pub fn outcome_for(&self, service: &str) -> Option<&ServiceOutcome> {
        self.records
            .iter()
            .find(|r| r.service == service)
            .map(|r| &r.outcome)
    }

    pub fn placed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, ServiceOutcome::Placed { .. }))
            .count()
    }

    pub fn is_all_placed(&self) -> bool {
        self.summary() == DeploymentSummary::AllPlaced
    }

    /// Collapse the records into the overall verdict. An empty request
    /// counts as fully placed.
    pub fn summary(&self) -> DeploymentSummary {
        let placed = self.placed_count();
        if placed == self.records.len() {
            DeploymentSummary::AllPlaced
        } else if placed == 0 {
            DeploymentSummary::NonePlaced
        } else {
            DeploymentSummary::PartiallyPlaced
        }
    }
}
