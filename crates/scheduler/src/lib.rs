//! gridsched-scheduler — placement policies and the dispatch engine.
//!
//! The scheduler core is driven by an external discrete-event simulator
//! (abstracted as [`SimHost`]) and decides, for each arriving task, which
//! physical machine hosts it. Machines are partitioned into per-CPU-
//! architecture pools; a pluggable [`PlacementPolicy`] picks one machine
//! from the task's pool; a lazily populated VM cache materializes one guest
//! VM per (machine, OS) pair; a ledger tracks in-flight tasks per machine
//! for completion accounting.
//!
//! # Architecture
//!
//! ```text
//! Scheduler
//!   ├── ArchPools (machines partitioned by CPU architecture, frozen)
//!   ├── PlacementPolicy (greedy | load-balance | min-min | round-robin)
//!   ├── VmCache ((machine, guest OS) → VM, created on first need)
//!   └── PlacementLedger (queue depths + task → machine reverse map)
//! ```

pub mod engine;
pub mod filter;
pub mod greedy;
pub mod ledger;
pub mod load_balance;
pub mod min_min;
pub mod pools;
pub mod round_robin;
pub mod vm_cache;

#[cfg(test)]
pub(crate) mod tests_common;

use gridsched_core::config::PlacementAlgorithm;
use gridsched_core::platform::SimHost;
use gridsched_core::types::{CpuArch, MachineId, TaskRequirements};

use crate::ledger::PlacementLedger;

/// Placement inputs for a single arriving task.
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    pub arch: CpuArch,
    pub needs_gpu: bool,
    pub memory_mb: u64,
    /// Total instruction count, used by runtime-estimating policies.
    pub instructions: u64,
}

impl From<&TaskRequirements> for PlacementRequest {
    fn from(req: &TaskRequirements) -> Self {
        Self {
            arch: req.cpu_arch,
            needs_gpu: req.gpu_required,
            memory_mb: req.memory_mb,
            instructions: req.total_instructions,
        }
    }
}

/// Trait for machine placement policies.
///
/// `pool` holds the machines matching the request's CPU architecture, in
/// ascending id order. A policy returns `None` only when no machine in the
/// pool satisfies the hard constraints (architecture is implied by the
/// pool; GPU adequacy is checked inside). Memory is a soft constraint:
/// every policy first requires nominal capacity, then retries without it.
pub trait PlacementPolicy: Send + Sync {
    /// Select a machine for the request, or `None` when placement fails.
    fn select(
        &mut self,
        sim: &dyn SimHost,
        pool: &[MachineId],
        req: &PlacementRequest,
        ledger: &PlacementLedger,
    ) -> Option<MachineId>;

    /// Name of the placement algorithm.
    fn name(&self) -> &str;
}

/// Instantiate the policy selected by configuration.
pub fn policy_for(algorithm: PlacementAlgorithm) -> Box<dyn PlacementPolicy> {
    match algorithm {
        PlacementAlgorithm::Greedy => Box::new(GreedyPolicy::new()),
        PlacementAlgorithm::LoadBalance => Box::new(LoadBalancePolicy::new()),
        PlacementAlgorithm::MinMin => Box::new(MinMinPolicy::new()),
        PlacementAlgorithm::RoundRobin => Box::new(RoundRobinPolicy::new()),
    }
}

pub use engine::Scheduler;
pub use greedy::GreedyPolicy;
pub use load_balance::LoadBalancePolicy;
pub use min_min::MinMinPolicy;
pub use round_robin::RoundRobinPolicy;
