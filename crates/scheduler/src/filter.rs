//! Candidate filtering shared by every placement policy.
//!
//! Architecture is hard (the pool already encodes it), GPU presence is
//! hard, memory capacity is soft: a first pass requires nominal capacity,
//! and only when that pass finds nothing does a second pass drop the
//! memory check. Overcommitted placements are legal and reported by the
//! simulator through memory warnings later.

use gridsched_core::platform::SimHost;
use gridsched_core::types::{MachineId, MachineInfo};

use crate::PlacementRequest;

/// GPU adequacy: the task needs no GPU, or the machine has at least one.
pub fn gpu_ok(info: &MachineInfo, req: &PlacementRequest) -> bool {
    !req.needs_gpu || info.gpus > 0
}

/// Memory adequacy against nominal capacity, not current free memory.
pub fn mem_ok(info: &MachineInfo, req: &PlacementRequest) -> bool {
    req.memory_mb <= info.memory_size_mb
}

/// Scan the pool and return the machine minimizing `score`.
///
/// Two passes: strict (GPU and memory) then relaxed (GPU only), the second
/// entered only when the first yields nothing. Ties resolve to the
/// candidate seen first in pool order.
pub fn min_score_scan(
    sim: &dyn SimHost,
    pool: &[MachineId],
    req: &PlacementRequest,
    mut score: impl FnMut(MachineId, &MachineInfo) -> f64,
) -> Option<MachineId> {
    for enforce_memory in [true, false] {
        let mut best: Option<(MachineId, f64)> = None;
        for &machine in pool {
            let info = sim.machine_info(machine);
            if !gpu_ok(&info, req) {
                continue;
            }
            if enforce_memory && !mem_ok(&info, req) {
                continue;
            }
            let s = score(machine, &info);
            if best.map_or(true, |(_, b)| s < b) {
                best = Some((machine, s));
            }
        }
        if let Some((machine, _)) = best {
            return Some(machine);
        }
    }
    None
}
