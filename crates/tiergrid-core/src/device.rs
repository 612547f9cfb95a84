//! `Device` — the unit a microservice is placed onto.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use tiergrid_resource::ResourceProfile;

/// Unique identifier for a device.
pub type DeviceId = String;

/// A schedulable resource: a capacity profile and a local image catalog.
///
/// The profile holds the *remaining* capacity per resource kind; commits
/// shrink it and teardowns restore it. At most the declared capacity of
/// each kind may ever be allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    id: DeviceId,
    profile: ResourceProfile,
    images: BTreeSet<String>,
}

impl Device {
    pub fn new(id: impl Into<DeviceId>, profile: ResourceProfile) -> Self {
        Self {
            id: id.into(),
            profile,
            images: BTreeSet::new(),
        }
    }

    /// Add an image to the local catalog, consuming and returning the
    /// device.
    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.images.insert(name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Remaining capacity per resource kind.
    pub fn capacity(&self) -> &ResourceProfile {
        &self.profile
    }

    /// Mutable capacity, for the orchestrator that governs this device.
    pub fn capacity_mut(&mut self) -> &mut ResourceProfile {
        &mut self.profile
    }

    /// Names of images hosted locally.
    pub fn images(&self) -> &BTreeSet<String> {
        &self.images
    }

    pub fn hosts_image(&self, name: &str) -> bool {
        self.images.contains(name)
    }
}
