//! Tie-break policies for the commit step.
//!
//! Candidate filtering and image locality narrow the field; the policy
//! picks exactly one device from what remains. Every policy is
//! deterministic given a fixed device enumeration order: ties fall back
//! to the first device in that order.

use serde::{Deserialize, Serialize};

use tiergrid_core::Device;
use tiergrid_net::AreaNetwork;
use tiergrid_resource::{ResourceKind, ResourceProfile};

/// How to choose among equally eligible candidates.
///
/// The default heuristic keeps the most headroom on the scarcest
/// requested kind; edge scopes prefer devices nearer the access point.
/// Pluggable: factories accept a policy override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Greatest residual capacity on the most constrained requested
    /// kind. Default.
    #[default]
    MostFreeHeadroom,
    /// Fewest hops to the network gateway, then headroom. Used by edge
    /// scopes, where proximity to the access point matters.
    NearestGateway,
}

impl TieBreakPolicy {
    /// Pick one device index out of `pool`.
    ///
    /// `pool` holds indices into `devices`, in enumeration order, and
    /// must only contain candidates that satisfy `requirements`.
    pub fn pick(
        &self,
        devices: &[Device],
        pool: &[usize],
        requirements: &ResourceProfile,
        network: &AreaNetwork,
    ) -> Option<usize> {
        match self {
            TieBreakPolicy::MostFreeHeadroom => pick_by_headroom(devices, pool, requirements),
            TieBreakPolicy::NearestGateway => {
                pick_by_proximity(devices, pool, requirements, network)
            }
        }
    }
}

/// The requested kind with the least total free capacity across the
/// pool. That is the dimension placement decisions should protect.
fn scarcest_kind(
    devices: &[Device],
    pool: &[usize],
    requirements: &ResourceProfile,
) -> Option<ResourceKind> {
    requirements.kinds().min_by_key(|kind| {
        pool.iter()
            .map(|&i| devices[i].capacity().free(*kind))
            .sum::<i64>()
    })
}

/// Residual capacity on `kind` if `requirements` were committed.
fn headroom(device: &Device, requirements: &ResourceProfile, kind: ResourceKind) -> i64 {
    device.capacity().free(kind) - requirements.free(kind)
}

fn pick_by_headroom(
    devices: &[Device],
    pool: &[usize],
    requirements: &ResourceProfile,
) -> Option<usize> {
    let Some(kind) = scarcest_kind(devices, pool, requirements) else {
        // Nothing requested: any candidate does, take the first.
        return pool.first().copied();
    };
    pool.iter().copied().reduce(|best, i| {
        if headroom(&devices[i], requirements, kind) > headroom(&devices[best], requirements, kind)
        {
            i
        } else {
            best
        }
    })
}

fn pick_by_proximity(
    devices: &[Device],
    pool: &[usize],
    requirements: &ResourceProfile,
    network: &AreaNetwork,
) -> Option<usize> {
    // Devices without a gateway metric sort last.
    let distance =
        |i: usize| -> u32 { network.hops_to_gateway(devices[i].id()).unwrap_or(u32::MAX) };
    let kind = scarcest_kind(devices, pool, requirements);

    pool.iter().copied().reduce(|best, i| {
        let closer = distance(i) < distance(best);
        let as_close = distance(i) == distance(best);
        let roomier = kind.is_some_and(|k| {
            headroom(&devices[i], requirements, k) > headroom(&devices[best], requirements, k)
        });
        if closer || (as_close && roomier) { i } else { best }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiergrid_resource::ResourceDescriptor;

    fn device(id: &str, mem: i64) -> Device {
        Device::new(id, ResourceProfile::new().with(ResourceDescriptor::memory(mem)))
    }

    fn mem_req(amount: i64) -> ResourceProfile {
        ResourceProfile::new().with(ResourceDescriptor::memory(amount))
    }

    fn flat_network(devices: &[Device]) -> AreaNetwork {
        AreaNetwork::new(devices.iter().map(|d| d.id().to_string())).routed(false)
    }

    #[test]
    fn headroom_prefers_the_roomiest_device() {
        let devices = vec![device("small", 4), device("big", 16), device("mid", 8)];
        let pool = vec![0, 1, 2];
        let net = flat_network(&devices);

        let picked = TieBreakPolicy::MostFreeHeadroom
            .pick(&devices, &pool, &mem_req(2), &net)
            .unwrap();
        assert_eq!(devices[picked].id(), "big");
    }

    #[test]
    fn headroom_tie_falls_back_to_enumeration_order() {
        let devices = vec![device("first", 8), device("second", 8)];
        let pool = vec![0, 1];
        let net = flat_network(&devices);

        let picked = TieBreakPolicy::MostFreeHeadroom
            .pick(&devices, &pool, &mem_req(2), &net)
            .unwrap();
        assert_eq!(devices[picked].id(), "first");
    }

    #[test]
    fn scarcest_kind_drives_the_choice() {
        // Bandwidth is scarcer than memory across the pool, so the
        // pick maximizes bandwidth headroom even though "fat-mem" has
        // far more memory.
        let fat_mem = Device::new(
            "fat-mem",
            ResourceProfile::new()
                .with(ResourceDescriptor::memory(64))
                .with(ResourceDescriptor::bandwidth(4)),
        );
        let fat_bw = Device::new(
            "fat-bw",
            ResourceProfile::new()
                .with(ResourceDescriptor::memory(8))
                .with(ResourceDescriptor::bandwidth(20)),
        );
        let devices = vec![fat_mem, fat_bw];
        let pool = vec![0, 1];
        let net = flat_network(&devices);
        let req = ResourceProfile::new()
            .with(ResourceDescriptor::memory(2))
            .with(ResourceDescriptor::bandwidth(2));

        let picked = TieBreakPolicy::MostFreeHeadroom
            .pick(&devices, &pool, &req, &net)
            .unwrap();
        assert_eq!(devices[picked].id(), "fat-bw");
    }

    #[test]
    fn nearest_gateway_prefers_closer_devices() {
        let devices = vec![device("far", 32), device("near", 4)];
        let mut net = AreaNetwork::new(devices.iter().map(|d| d.id().to_string()))
            .with_gateway("near");
        net.link("far", "near", tiergrid_net::LinkQuality::new(10, 5))
            .unwrap();
        let pool = vec![0, 1];

        let picked = TieBreakPolicy::NearestGateway
            .pick(&devices, &pool, &mem_req(2), &net)
            .unwrap();
        assert_eq!(devices[picked].id(), "near");
    }

    #[test]
    fn nearest_gateway_ties_resolve_by_headroom() {
        // Both one hop from the gateway; the roomier device wins.
        let devices = vec![device("gw", 0), device("a", 4), device("b", 16)];
        let net = AreaNetwork::new(devices.iter().map(|d| d.id().to_string()))
            .with_gateway("gw");
        let pool = vec![1, 2];

        let picked = TieBreakPolicy::NearestGateway
            .pick(&devices, &pool, &mem_req(2), &net)
            .unwrap();
        assert_eq!(devices[picked].id(), "b");
    }

    #[test]
    fn empty_pool_picks_nothing() {
        let devices = vec![device("only", 4)];
        let net = flat_network(&devices);
        assert_eq!(
            TieBreakPolicy::MostFreeHeadroom.pick(&devices, &[], &mem_req(1), &net),
            None
        );
    }
}
