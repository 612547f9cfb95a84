//! End-to-end: a TOML plan becomes a continuum, applications deploy
//! across it, and capacity accounting holds up along the way.

use tiergrid_factory::ContinuumConfig;
use tiergrid_placement::{DeploymentSummary, Orchestrator, ServiceOutcome};
use tiergrid_resource::ResourceKind;

const PLAN: &str = r#"
    [[clouds]]
    name = "cloud-main"

    [[clouds.devices]]
    id = "cloud-big"
    resources = { memory = "16", compute = "8" }
    images = ["api", "worker"]

    [[clouds.devices]]
    id = "cloud-small"
    resources = { memory = "4", compute = "2" }
    images = ["api"]

    [[edges]]
    name = "edge-east"
    gateway = "edge-gw"

    [[edges.devices]]
    id = "edge-gw"
    resources = { memory = "2" }
    images = ["sensor"]

    [[edges.devices]]
    id = "edge-node"
    resources = { memory = "4" }
    images = ["sensor"]

    [[applications]]
    name = "telemetry"

    [[applications.services]]
    id = "collector"
    image = "sensor"
    requirements = { memory = "3" }

    [[applications.services]]
    id = "api"
    image = "api"
    requirements = { memory = "6", compute = "4" }

    [[applications.services]]
    id = "archiver"
    image = "worker"
    requirements = { memory = "8", compute = "2" }
"#;

#[test]
fn plan_deploys_across_the_continuum() {
    let config = ContinuumConfig::from_toml_str(PLAN).unwrap();
    let mut continuum = config.build().unwrap();
    let apps = config.applications().unwrap();

    let report = continuum.deploy(&apps[0]);
    assert_eq!(report.summary(), DeploymentSummary::AllPlaced);

    // The sensor image only exists on the edge; the edge tie-break
    // prefers the gateway, but only edge-node has 3 memory free.
    assert_eq!(
        report.outcome_for("collector"),
        Some(&ServiceOutcome::Placed {
            device: "edge-node".to_string()
        })
    );
    // Cloud services land on the only devices that fit them.
    assert_eq!(
        report.outcome_for("api"),
        Some(&ServiceOutcome::Placed {
            device: "cloud-big".to_string()
        })
    );
    assert_eq!(
        report.outcome_for("archiver"),
        Some(&ServiceOutcome::Placed {
            device: "cloud-big".to_string()
        })
    );

    // Capacity invariant: committed requirements never exceed the
    // declared capacity, per device and kind.
    let cloud = continuum.infrastructure("cloud-main").unwrap();
    assert_eq!(cloud.device("cloud-big").unwrap().capacity().free(ResourceKind::MemoryAmount), 2);
    assert_eq!(cloud.device("cloud-big").unwrap().capacity().free(ResourceKind::ComputingCapacity), 2);
    assert_eq!(cloud.device("cloud-small").unwrap().capacity().free(ResourceKind::MemoryAmount), 4);

    let edge = continuum.infrastructure("edge-east").unwrap();
    assert_eq!(edge.device("edge-node").unwrap().capacity().free(ResourceKind::MemoryAmount), 1);
    assert_eq!(edge.device("edge-gw").unwrap().capacity().free(ResourceKind::MemoryAmount), 2);
}

#[test]
fn redeploying_until_exhaustion_reports_partial_failure() {
    let config = ContinuumConfig::from_toml_str(PLAN).unwrap();
    let mut continuum = config.build().unwrap();
    let apps = config.applications().unwrap();

    // First pass fits entirely; a second identical pass does not.
    let first = continuum.deploy(&apps[0]);
    assert_eq!(first.summary(), DeploymentSummary::AllPlaced);

    let second = continuum.deploy(&apps[0]);
    assert_eq!(second.summary(), DeploymentSummary::NonePlaced);

    // No device went negative on any kind.
    for infrastructure in continuum.infrastructures() {
        for device in infrastructure.devices() {
            for (_, descriptor) in device.capacity().iter() {
                assert!(!descriptor.is_overcommitted());
            }
        }
    }
}
