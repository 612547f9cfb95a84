//! tiergrid-core — shared domain types for the TierGrid continuum.
//!
//! The vocabulary every other crate speaks:
//!
//! - **`device`** — `Device`, the schedulable unit: a capacity profile
//!   plus the set of images it hosts locally
//! - **`application`** — `ImageRef`, `Microservice`, `Application`: what
//!   gets deployed and what it requires
//!
//! Devices belong to exactly one infrastructure and their resource state
//! is mutated only by the orchestrator governing that infrastructure.

pub mod application;
pub mod device;

pub use application::{Application, ImageRef, Microservice};
pub use device::{Device, DeviceId};

/// Unique identifier for a microservice within an application.
pub type ServiceId = String;

/// Unique identifier for a computing infrastructure.
pub type InfrastructureId = String;
