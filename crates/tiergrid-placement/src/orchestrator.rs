//! The one orchestration capability every scope implements.

use std::fmt;

use serde::{Deserialize, Serialize};

use tiergrid_core::Application;

use crate::report::DeploymentReport;

/// Scope tag of a domain orchestrator.
///
/// Variants replace a subtype per scope: the placement logic is shared
/// and the tag selects the scope-specific tie-break refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Cloud,
    Edge,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Cloud => f.write_str("cloud"),
            ScopeKind::Edge => f.write_str("edge"),
        }
    }
}

/// A decision-maker over one scope of resources.
///
/// `deploy` evaluates every service of `app` against the scope, commits
/// what fits, and reports per-service outcomes. Implementations differ
/// in resolution strategy (device-level placement vs delegation across
/// infrastructures), never in the contract: errors do not escape a
/// deploy call, partial placement is reported, and services are handled
/// in the order the application presents them.
pub trait Orchestrator {
    fn deploy(&mut self, app: &Application) -> DeploymentReport;
}
