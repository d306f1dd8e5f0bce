use tracing::debug;

use gridsched_core::platform::SimHost;
use gridsched_core::types::MachineId;

use crate::filter::min_score_scan;
use crate::ledger::PlacementLedger;
use crate::{PlacementPolicy, PlacementRequest};

/// Load-balancing policy: dispatch to the machine with the fewest active
/// tasks as reported by the simulator. Unlike the greedy policy this reads
/// the authoritative cluster load, which also counts work the scheduler
/// did not place itself.
pub struct LoadBalancePolicy;

impl LoadBalancePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoadBalancePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementPolicy for LoadBalancePolicy {
    fn select(
        &mut self,
        sim: &dyn SimHost,
        pool: &[MachineId],
        req: &PlacementRequest,
        _ledger: &PlacementLedger,
    ) -> Option<MachineId> {
        let machine = min_score_scan(sim, pool, req, |_, info| f64::from(info.active_tasks))?;
        debug!(
            "Load-balance selected machine {} (active_tasks={})",
            machine,
            sim.machine_info(machine).active_tasks
        );
        Some(machine)
    }

    fn name(&self) -> &str {
        "load-balance"
    }
}
