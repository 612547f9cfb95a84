//! `ResourceDescriptor` — a mutable, kind-tagged quantity.
//!
//! All four resource kinds share this one integer-valued descriptor;
//! the kind tag replaces a subtype per kind. Comparison and arithmetic
//! are closed over the kind: the two primitives (`greater_than`,
//! `equals`) plus `add`/`subtract` are all a kind needs, and the
//! remaining relations (`at_least`, `less_than`, `at_most`, `differs`)
//! are derived from the primitives once, here, so no kind can ship an
//! inconsistent ordering.

use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, ResourceResult};
use crate::kind::ResourceKind;

/// One resource dimension of a device or requirement.
///
/// Created at device/requirement construction time and mutated in place
/// when a placement commits (capacity decreases on the host) or is torn
/// down (capacity is restored). Each device owns its descriptors
/// exclusively; descriptors are cloned, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    kind: ResourceKind,
    value: i64,
}

impl ResourceDescriptor {
    /// Create a descriptor for `kind` holding `value`.
    pub fn new(kind: ResourceKind, value: i64) -> Self {
        Self { kind, value }
    }

    /// Parse a descriptor from a textual magnitude.
    ///
    /// Fails with [`ResourceError::MalformedValue`] at construction, so
    /// a bad magnitude never surfaces at first use.
    pub fn parse(kind: ResourceKind, raw: &str) -> ResourceResult<Self> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|source| ResourceError::MalformedValue {
                kind,
                raw: raw.to_string(),
                source,
            })?;
        Ok(Self::new(kind, value))
    }

    /// Memory amount in megabytes.
    pub fn memory(value: i64) -> Self {
        Self::new(ResourceKind::MemoryAmount, value)
    }

    /// Network bandwidth in megabits per second.
    pub fn bandwidth(value: i64) -> Self {
        Self::new(ResourceKind::NetworkBandwidth, value)
    }

    /// Processing capacity in compute units.
    pub fn compute(value: i64) -> Self {
        Self::new(ResourceKind::ComputingCapacity, value)
    }

    /// Storage space in megabytes.
    pub fn storage(value: i64) -> Self {
        Self::new(ResourceKind::Storage, value)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    /// A negative value means more was claimed than the descriptor held.
    pub fn is_overcommitted(&self) -> bool {
        self.value < 0
    }

    fn check_kind(&self, other: &ResourceDescriptor) -> ResourceResult<()> {
        if self.kind == other.kind {
            Ok(())
        } else {
            Err(ResourceError::MismatchedKind {
                expected: self.kind,
                found: other.kind,
            })
        }
    }

    // ── Primitives ────────────────────────────────────────────────

    /// Strict `self > other`. Fails on mismatched kinds.
    pub fn greater_than(&self, other: &ResourceDescriptor) -> ResourceResult<bool> {
        self.check_kind(other)?;
        Ok(self.value > other.value)
    }

    /// `self == other` within one kind. Fails on mismatched kinds.
    pub fn equals(&self, other: &ResourceDescriptor) -> ResourceResult<bool> {
        self.check_kind(other)?;
        Ok(self.value == other.value)
    }

    /// Combined magnitude `self + other`. Fails on mismatched kinds.
    pub fn add(&self, other: &ResourceDescriptor) -> ResourceResult<i64> {
        self.check_kind(other)?;
        Ok(self.value + other.value)
    }

    /// Combined magnitude `self - other`. Fails on mismatched kinds.
    ///
    /// Never clamped at zero: a negative result signals over-allocation
    /// and the caller decides whether to reject it.
    pub fn subtract(&self, other: &ResourceDescriptor) -> ResourceResult<i64> {
        self.check_kind(other)?;
        Ok(self.value - other.value)
    }

    // ── Derived relations ─────────────────────────────────────────
    //
    // Implemented once in terms of the primitives; a kind cannot
    // contradict its own ordering.

    /// `self >= other`.
    pub fn at_least(&self, other: &ResourceDescriptor) -> ResourceResult<bool> {
        Ok(self.greater_than(other)? || self.equals(other)?)
    }

    /// `self < other`.
    pub fn less_than(&self, other: &ResourceDescriptor) -> ResourceResult<bool> {
        Ok(!self.at_least(other)?)
    }

    /// `self <= other`.
    pub fn at_most(&self, other: &ResourceDescriptor) -> ResourceResult<bool> {
        Ok(!self.greater_than(other)?)
    }

    /// `self != other`.
    pub fn differs(&self, other: &ResourceDescriptor) -> ResourceResult<bool> {
        Ok(!self.equals(other)?)
    }

    // ── In-place mutation ─────────────────────────────────────────

    /// Grow this descriptor by `other` (capacity restored on teardown).
    pub fn increase_by(&mut self, other: &ResourceDescriptor) -> ResourceResult<()> {
        self.value = self.add(other)?;
        Ok(())
    }

    /// Shrink this descriptor by `other` (capacity consumed on commit).
    pub fn decrease_by(&mut self, other: &ResourceDescriptor) -> ResourceResult<()> {
        self.value = self.subtract(other)?;
        Ok(())
    }
}
