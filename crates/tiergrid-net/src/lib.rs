//! tiergrid-net — connectivity between devices and infrastructures.
//!
//! Orchestrators consume networks, they never build them; construction
//! belongs to the factories. Two scopes of connectivity exist:
//!
//! - **`area`** — `AreaNetwork`, the network inside one computing
//!   infrastructure (a cloud or an edge cluster): a device set, internal
//!   and external bandwidth, an optional gateway, and the hop metric the
//!   edge tie-break consumes
//! - **`continuum`** — `ContinuumNetwork`, pairwise links between whole
//!   infrastructures, established by a pluggable [`TopologyStrategy`]
//!
//! Link quality lookups are in-memory and synchronous; there is no I/O
//! at this layer.

pub mod area;
pub mod continuum;
pub mod error;
pub mod link;
pub mod strategy;

pub use area::AreaNetwork;
pub use continuum::ContinuumNetwork;
pub use error::{NetError, NetResult};
pub use link::LinkQuality;
pub use strategy::{CliqueConfig, TopologyStrategy};
