use tracing::debug;

use gridsched_core::platform::SimHost;
use gridsched_core::types::MachineId;

use crate::filter::min_score_scan;
use crate::ledger::PlacementLedger;
use crate::{PlacementPolicy, PlacementRequest};

/// Greedy minimum-queue policy: dispatch to the machine with the fewest
/// tasks this scheduler has in flight there.
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementPolicy for GreedyPolicy {
    fn select(
        &mut self,
        sim: &dyn SimHost,
        pool: &[MachineId],
        req: &PlacementRequest,
        ledger: &PlacementLedger,
    ) -> Option<MachineId> {
        let machine = min_score_scan(sim, pool, req, |m, _| ledger.depth(m) as f64)?;
        debug!(
            "Greedy selected machine {} (queue={})",
            machine,
            ledger.depth(machine)
        );
        Some(machine)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
