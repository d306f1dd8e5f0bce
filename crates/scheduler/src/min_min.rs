use tracing::debug;

use gridsched_core::platform::SimHost;
use gridsched_core::types::MachineId;

use crate::filter::min_score_scan;
use crate::ledger::PlacementLedger;
use crate::{PlacementPolicy, PlacementRequest};

/// Min–Min earliest-finish-time policy.
///
/// Estimates each candidate's completion time as
/// `(queue + 1) * instructions / peak_performance`, assuming tasks run
/// serially at the machine's peak rate, and dispatches to the minimizer.
/// Fast machines absorb more work than the plain queue count would give
/// them.
pub struct MinMinPolicy;

impl MinMinPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinMinPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementPolicy for MinMinPolicy {
    fn select(
        &mut self,
        sim: &dyn SimHost,
        pool: &[MachineId],
        req: &PlacementRequest,
        ledger: &PlacementLedger,
    ) -> Option<MachineId> {
        let machine = min_score_scan(sim, pool, req, |m, info| {
            let solo_time = req.instructions as f64 / info.peak_performance() as f64;
            f64::from(ledger.depth(m) + 1) * solo_time
        })?;
        debug!(
            "Min-Min selected machine {} (queue={}, peak={})",
            machine,
            ledger.depth(machine),
            sim.machine_info(machine).peak_performance()
        );
        Some(machine)
    }

    fn name(&self) -> &str {
        "min-min"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_common::*;
    use gridsched_core::types::CpuArch;

    #[test]
    fn equal_queues_prefer_the_faster_machine() {
        let mut specs = vec![
            machine(CpuArch::X86, 16384, 0),
            machine(CpuArch::X86, 16384, 0),
        ];
        specs[0].performance = vec![1_000_000];
        specs[1].performance = vec![4_000_000];
        let sim = SimFixture::new(specs);

        let mut policy = MinMinPolicy::new();
        let ledger = PlacementLedger::new(2);
        let req = placement_request(CpuArch::X86, false, 1024);

        assert_eq!(policy.select(&sim, &[0, 1], &req, &ledger), Some(1));
    }

    #[test]
    fn a_long_queue_erodes_a_speed_advantage() {
        // Machine 1 is twice as fast but holds four queued tasks:
        // (4+1)/2e6 > (0+1)/1e6, so the slow idle machine finishes sooner.
        let mut specs = vec![
            machine(CpuArch::X86, 16384, 0),
            machine(CpuArch::X86, 16384, 0),
        ];
        specs[0].performance = vec![1_000_000];
        specs[1].performance = vec![2_000_000];
        let sim = SimFixture::new(specs);

        let mut ledger = PlacementLedger::new(2);
        for task in 0..4u64 {
            ledger.record_dispatch(task, 1);
        }

        let mut policy = MinMinPolicy::new();
        let req = placement_request(CpuArch::X86, false, 1024);

        assert_eq!(policy.select(&sim, &[0, 1], &req, &ledger), Some(0));
    }

    #[test]
    fn missing_performance_data_does_not_divide_by_zero() {
        let mut specs = vec![
            machine(CpuArch::X86, 16384, 0),
            machine(CpuArch::X86, 16384, 0),
        ];
        specs[0].performance = Vec::new();
        specs[1].performance = vec![0];
        let sim = SimFixture::new(specs);

        let mut policy = MinMinPolicy::new();
        let ledger = PlacementLedger::new(2);
        let req = placement_request(CpuArch::X86, false, 1024);

        // Both peaks degrade to 1; the tie breaks to pool order.
        assert_eq!(policy.select(&sim, &[0, 1], &req, &ledger), Some(0));
    }
}
