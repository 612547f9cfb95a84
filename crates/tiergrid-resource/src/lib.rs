//! tiergrid-resource — resource accounting for the TierGrid continuum.
//!
//! Every schedulable unit in TierGrid (a device, a microservice
//! requirement) describes capacity as a set of kind-tagged integer
//! quantities. This crate provides:
//!
//! - **`kind`** — the enumerated resource dimensions (memory, bandwidth,
//!   compute, storage)
//! - **`descriptor`** — `ResourceDescriptor`, a mutable kind-tagged
//!   quantity with comparison and arithmetic closed over its kind
//! - **`profile`** — `ResourceProfile`, the per-device / per-requirement
//!   map from kind to descriptor, with satisfy/claim/release semantics
//! - **`error`** — kind-mismatch and parse failures
//!
//! Descriptors of different kinds never compare or combine: mixing kinds
//! is a [`ResourceError::MismatchedKind`], not a silent coercion.
//! Subtraction is never clamped at zero; a negative value is a valid
//! over-allocation signal that callers must reject before committing.

pub mod descriptor;
pub mod error;
pub mod kind;
pub mod profile;

pub use descriptor::ResourceDescriptor;
pub use error::{ResourceError, ResourceResult};
pub use kind::ResourceKind;
pub use profile::ResourceProfile;
