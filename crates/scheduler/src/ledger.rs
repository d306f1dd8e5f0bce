use std::collections::HashMap;

use gridsched_core::types::{MachineId, TaskId};

/// Dispatch bookkeeping: per-machine queue depths plus the task → machine
/// reverse map used for O(1) completion accounting.
///
/// Depth counts tasks this scheduler dispatched to the machine and has not
/// yet observed complete. It equals the number of live reverse-map entries
/// pointing at the machine.
pub struct PlacementLedger {
    queue_depth: Vec<u32>,
    placements: HashMap<TaskId, MachineId>,
}

impl PlacementLedger {
    pub fn new(total_machines: u32) -> Self {
        Self {
            queue_depth: vec![0; total_machines as usize],
            placements: HashMap::new(),
        }
    }

    /// Tasks dispatched to the machine and not yet observed complete.
    pub fn depth(&self, machine: MachineId) -> u32 {
        self.queue_depth.get(machine as usize).copied().unwrap_or(0)
    }

    pub fn record_dispatch(&mut self, task: TaskId, machine: MachineId) {
        if let Some(depth) = self.queue_depth.get_mut(machine as usize) {
            *depth += 1;
        }
        self.placements.insert(task, machine);
    }

    /// Settle a completion, returning the machine the task ran on.
    /// Idempotent: a task with no live placement leaves state untouched.
    pub fn record_completion(&mut self, task: TaskId) -> Option<MachineId> {
        let machine = self.placements.remove(&task)?;
        if let Some(depth) = self.queue_depth.get_mut(machine as usize) {
            if *depth > 0 {
                *depth -= 1;
            }
        }
        Some(machine)
    }

    /// Number of dispatched, not-yet-complete tasks.
    pub fn in_flight(&self) -> usize {
        self.placements.len()
    }
}
