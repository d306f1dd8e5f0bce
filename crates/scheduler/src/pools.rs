use std::collections::HashMap;

use tracing::{info, warn};

use gridsched_core::platform::SimHost;
use gridsched_core::types::{CpuArch, MachineId, MAX_MACHINES};

/// Machines partitioned by CPU architecture.
///
/// Built once from the simulator inventory and frozen. Every machine id
/// below the tracked total appears in exactly one pool, in ascending order.
pub struct ArchPools {
    pools: HashMap<CpuArch, Vec<MachineId>>,
    total: u32,
}

impl ArchPools {
    pub fn discover(sim: &dyn SimHost) -> Self {
        let reported = sim.total_machines();
        let total = reported.min(MAX_MACHINES);
        if reported > total {
            warn!(
                "Simulator reports {} machines, tracking the first {}",
                reported, total
            );
        }

        let mut pools: HashMap<CpuArch, Vec<MachineId>> = HashMap::new();
        for machine in 0..total {
            pools.entry(sim.cpu_arch(machine)).or_default().push(machine);
        }
        info!("Partitioned {} machines into {} architecture pools", total, pools.len());

        Self { pools, total }
    }

    /// Machines of the given architecture, ascending by id.
    /// Empty iff no machine of that architecture exists.
    pub fn pool(&self, arch: CpuArch) -> &[MachineId] {
        self.pools.get(&arch).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of machines tracked, after any ceiling clamp.
    pub fn total(&self) -> u32 {
        self.total
    }
}
