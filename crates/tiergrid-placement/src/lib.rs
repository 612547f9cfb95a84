//! tiergrid-placement — placement decisions for the TierGrid continuum.
//!
//! This crate decides which device each microservice runs on. It does
//! NOT build topologies (that's `tiergrid-factory`) or model capacity
//! arithmetic (that's `tiergrid-resource`). One `deploy` contract spans
//! every scope:
//!
//! ```text
//! ComputingContinuum
//!   └── ContinuumOrchestrator          (admission pre-check, delegation)
//!       ├── ComputingInfrastructure    (cloud)
//!       │   └── DomainOrchestrator     (filter → image locality → commit)
//!       └── ComputingInfrastructure    (edge cluster)
//!           └── DomainOrchestrator     (same, gateway-aware tie-break)
//! ```
//!
//! # Components
//!
//! - **`report`** — per-service outcomes and the deployment summary
//! - **`policy`** — tie-break policies for the commit step
//! - **`domain`** — `DomainOrchestrator`, device-level placement
//! - **`infrastructure`** — `ComputingInfrastructure`, one deployable scope
//! - **`continuum`** — `ContinuumOrchestrator` and `ComputingContinuum`
//!
//! A service that cannot be placed is *reported*, never thrown: partial
//! placement is a valid terminal outcome and the caller decides between
//! roll-back and accept-partial.

pub mod continuum;
pub mod domain;
pub mod infrastructure;
pub mod orchestrator;
pub mod policy;
pub mod report;

pub use continuum::{ComputingContinuum, ContinuumOrchestrator};
pub use domain::DomainOrchestrator;
pub use infrastructure::ComputingInfrastructure;
pub use orchestrator::{Orchestrator, ScopeKind};
pub use policy::TieBreakPolicy;
pub use report::{DeploymentReport, DeploymentSummary, PlacementRecord, ServiceOutcome};
