use std::collections::HashMap;

use tracing::debug;

use gridsched_core::platform::SimHost;
use gridsched_core::types::{CpuArch, MachineId};

use crate::filter::{gpu_ok, mem_ok};
use crate::ledger::PlacementLedger;
use crate::{PlacementPolicy, PlacementRequest};

/// Round-robin policy: the first passing machine wins, with the traversal
/// starting just past the previous pick for that architecture.
///
/// Each pool keeps its own cursor. The traversal wraps the pool once per
/// pass (strict, then memory-relaxed). A successful pick advances the
/// cursor past the chosen slot; a failed placement leaves it untouched.
pub struct RoundRobinPolicy {
    cursor: HashMap<CpuArch, usize>,
}

impl RoundRobinPolicy {
    pub fn new() -> Self {
        Self {
            cursor: HashMap::new(),
        }
    }
}

impl Default for RoundRobinPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementPolicy for RoundRobinPolicy {
    fn select(
        &mut self,
        sim: &dyn SimHost,
        pool: &[MachineId],
        req: &PlacementRequest,
        _ledger: &PlacementLedger,
    ) -> Option<MachineId> {
        if pool.is_empty() {
            return None;
        }
        let start = self.cursor.get(&req.arch).copied().unwrap_or(0) % pool.len();

        for enforce_memory in [true, false] {
            for offset in 0..pool.len() {
                let slot = (start + offset) % pool.len();
                let machine = pool[slot];
                let info = sim.machine_info(machine);
                if !gpu_ok(&info, req) {
                    continue;
                }
                if enforce_memory && !mem_ok(&info, req) {
                    continue;
                }

                self.cursor.insert(req.arch, (slot + 1) % pool.len());
                debug!("Round-robin selected machine {} (slot {})", machine, slot);
                return Some(machine);
            }
        }
        None
    }

    fn name(&self) -> &str {
        "round-robin"
    }
}
