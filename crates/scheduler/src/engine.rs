//! The scheduler core, driven one callback at a time by the simulator.

use tracing::{debug, info, trace, warn};

use gridsched_core::config::SchedulerConfig;
use gridsched_core::error::CoreError;
use gridsched_core::platform::SimHost;
use gridsched_core::types::{
    MachineId, Priority, SimTime, SlaClass, TaskId, TaskRequirements, VmId,
};

use crate::ledger::PlacementLedger;
use crate::pools::ArchPools;
use crate::vm_cache::VmCache;
use crate::{policy_for, PlacementPolicy, PlacementRequest};

/// Owns the machine pools, the VM cache, the dispatch ledger, and the
/// active placement policy. One instance per simulation run; construction
/// is initialization, so there is no separate init entry point to guard.
pub struct Scheduler {
    policy: Box<dyn PlacementPolicy>,
    pools: ArchPools,
    vms: VmCache,
    ledger: PlacementLedger,
}

impl Scheduler {
    /// Build a scheduler against the simulator's machine inventory.
    pub fn new(sim: &dyn SimHost, policy: Box<dyn PlacementPolicy>) -> Self {
        let pools = ArchPools::discover(sim);
        let ledger = PlacementLedger::new(pools.total());
        info!("Scheduler ready ({}, {} machines)", policy.name(), pools.total());
        Self {
            policy,
            pools,
            vms: VmCache::new(),
            ledger,
        }
    }

    pub fn from_config(sim: &dyn SimHost, config: &SchedulerConfig) -> Self {
        Self::new(sim, policy_for(config.algorithm))
    }

    /// Task arrival: pick a host, materialize its VM, submit, account.
    ///
    /// A task with no compatible host is reported to the simulator exactly
    /// once and leaves every piece of scheduler state untouched.
    pub fn handle_new_task(&mut self, sim: &mut dyn SimHost, now: SimTime, task: TaskId) {
        let req = sim.task_requirements(task);
        let priority = req.sla.dispatch_priority();

        match self.place(&*sim, &req, task) {
            Ok(machine) => {
                let vm = self.vms.ensure(sim, machine, req.vm_type);
                sim.add_task(vm, task, priority);
                self.ledger.record_dispatch(task, machine);
                debug!(
                    "Task {} ({}, {}, {}) -> machine {} vm {} at {} priority, t={}",
                    task, req.cpu_arch, req.vm_type, req.sla, machine, vm, priority, now
                );
            }
            Err(e) => {
                warn!("Task {} not dispatched at t={}: {}", task, now, e);
                sim.report_incompatible(
                    &format!("{}: no compatible machine for task", self.policy.name()),
                    task,
                );
            }
        }
    }

    fn place(
        &mut self,
        sim: &dyn SimHost,
        req: &TaskRequirements,
        task: TaskId,
    ) -> Result<MachineId, CoreError> {
        let request = PlacementRequest::from(req);
        self.policy
            .select(sim, self.pools.pool(request.arch), &request, &self.ledger)
            .ok_or(CoreError::NoCompatibleMachine { task })
    }

    /// Task completion: settle the ledger entry for the hosting machine.
    /// Duplicate or unknown completions are ignored.
    pub fn handle_task_completion(&mut self, now: SimTime, task: TaskId) {
        if let Some(machine) = self.ledger.record_completion(task) {
            trace!("Task {} completed on machine {} at t={}", task, machine, now);
        }
    }

    /// The simulator detected memory overcommit on a machine. Expected
    /// under load: placement checks nominal capacity, not free memory.
    pub fn memory_warning(&self, now: SimTime, machine: MachineId) {
        warn!("Memory overcommit on machine {} at t={}", machine, now);
    }

    /// A VM migration finished. Reserved hook for migration-aware policies.
    pub fn migration_done(&self, now: SimTime, vm: VmId) {
        debug!("Migration of VM {} completed at t={}", vm, now);
    }

    /// Periodic tick. The base policies only observe the energy meter.
    pub fn scheduler_check(&self, sim: &dyn SimHost, now: SimTime) {
        let energy = sim.cluster_energy();
        trace!("Periodic check at t={}: cluster energy {}KW-Hour", now, energy);
    }

    /// Pending SLA breach: best-effort elevation to high priority for
    /// tasks still in flight.
    pub fn sla_warning(&self, sim: &mut dyn SimHost, now: SimTime, task: TaskId) {
        if sim.is_task_complete(task) {
            return;
        }
        debug!("SLA warning for task {} at t={}, raising priority", task, now);
        sim.set_task_priority(task, Priority::High);
    }

    /// A machine state change requested earlier was acknowledged.
    /// Reserved hook; the base policies never command state changes.
    pub fn state_change_complete(&self, now: SimTime, machine: MachineId) {
        trace!("State change for machine {} acknowledged at t={}", machine, now);
    }

    /// End of run: print the SLA and energy report, then shut down every
    /// VM this scheduler created.
    pub fn simulation_complete(&self, sim: &mut dyn SimHost, now: SimTime) {
        println!("SLA violation report");
        println!("SLA0: {}%", sim.sla_report(SlaClass::Sla0));
        println!("SLA1: {}%", sim.sla_report(SlaClass::Sla1));
        // SLA3 carries no violation obligation.
        println!("SLA2: {}%", sim.sla_report(SlaClass::Sla2));
        println!("Total Energy {}KW-Hour", sim.cluster_energy());
        println!(
            "Simulation run finished in {} seconds",
            now as f64 / 1_000_000.0
        );

        info!("Shutting down {} VMs", self.vms.len());
        self.vms.shutdown_all(sim);
    }

    /// Tasks dispatched and not yet observed complete.
    pub fn in_flight(&self) -> usize {
        self.ledger.in_flight()
    }

    /// In-flight tasks on one machine.
    pub fn queue_depth(&self, machine: MachineId) -> u32 {
        self.ledger.depth(machine)
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }
}
