//! `ResourceProfile` — the capacity map of a device or requirement.
//!
//! Keyed by [`ResourceKind`], so lookups never mix kinds. Iteration
//! order is the canonical kind order (BTreeMap), which keeps placement
//! decisions deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::descriptor::ResourceDescriptor;
use crate::kind::ResourceKind;

/// Mapping from resource kind to its descriptor.
///
/// A device's profile is its remaining capacity; a microservice's
/// profile is its minimum requirement. A kind absent from a device
/// profile means zero capacity for that kind, so any positive demand
/// on it is unsatisfiable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceProfile {
    descriptors: BTreeMap<ResourceKind, ResourceDescriptor>,
}

impl ResourceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor, consuming and returning the profile.
    pub fn with(mut self, descriptor: ResourceDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Insert a descriptor, replacing any existing one of the same kind.
    pub fn insert(&mut self, descriptor: ResourceDescriptor) {
        self.descriptors.insert(descriptor.kind(), descriptor);
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceDescriptor> {
        self.descriptors.get(&kind)
    }

    /// Remaining magnitude for `kind`; absent kinds report zero.
    pub fn free(&self, kind: ResourceKind) -> i64 {
        self.descriptors.get(&kind).map_or(0, |d| d.value())
    }

    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.descriptors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKind, &ResourceDescriptor)> {
        self.descriptors.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Whether this profile covers every requirement in `requirements`.
    ///
    /// Every required kind must be present here with at least the
    /// required magnitude. A missing kind fails the check; it is not an
    /// error.
    pub fn satisfies(&self, requirements: &ResourceProfile) -> bool {
        requirements.iter().all(|(kind, need)| {
            self.descriptors
                .get(kind)
                .is_some_and(|have| matches!(have.at_least(need), Ok(true)))
        })
    }

    /// Consume `requirements` from this profile.
    ///
    /// All-or-nothing: when any requirement is unsatisfied the profile
    /// is left untouched and `false` is returned. On success every
    /// matching descriptor shrinks by the required amount.
    pub fn claim(&mut self, requirements: &ResourceProfile) -> bool {
        if !self.satisfies(requirements) {
            return false;
        }
        for (kind, need) in requirements.iter() {
            if let Some(have) = self.descriptors.get_mut(kind) {
                have.set_value(have.value() - need.value());
            }
        }
        true
    }

    /// Restore previously claimed `requirements` (placement teardown).
    pub fn release(&mut self, requirements: &ResourceProfile) {
        for (kind, need) in requirements.iter() {
            if let Some(have) = self.descriptors.get_mut(kind) {
                have.set_value(have.value() + need.value());
            }
        }
    }
}

impl FromIterator<ResourceDescriptor> for ResourceProfile {
    fn from_iter<I: IntoIterator<Item = ResourceDescriptor>>(iter: I) -> Self {
        let mut profile = Self::new();
        for descriptor in iter {
            profile.insert(descriptor);
        }
        profile
    }
}
