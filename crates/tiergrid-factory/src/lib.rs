//! tiergrid-factory — assembling computing infrastructures and continuums.
//!
//! Construction is configuration-driven and runs once, at topology
//! build time; the structures it produces are fixed afterwards (device
//! state changes, device sets do not).
//!
//! # Components
//!
//! - **`factory`** — `CloudFactory` / `EdgeFactory`: an immutable base
//!   configuration plus functional per-call overrides produce
//!   `ComputingInfrastructure` instances
//! - **`builder`** — the typestate continuum builder: network →
//!   orchestrator → continuum, in that order by construction; calling
//!   the steps out of order does not compile
//! - **`config`** — TOML deployment plans (`ContinuumConfig`) that feed
//!   the factories and builder
//! - **`error`** — missing-option and validation failures

pub mod builder;
pub mod config;
pub mod error;
pub mod factory;

pub use builder::{ContinuumBuilder, NetworkedBuilder, OrchestratedBuilder, construct};
pub use config::{
    ApplicationConfig, ClusterConfig, ContinuumConfig, DeviceConfig, ServiceConfig,
};
pub use error::{FactoryError, FactoryResult};
pub use factory::{CloudFactory, ComputingInfrastructureFactory, EdgeFactory, FactoryOptions};
