//! The simulator surface the scheduler is driven against.
//!
//! The discrete-event simulator owns the cluster model: machines, VMs,
//! tasks, the clock, energy metering, and SLA accounting. The scheduler
//! only ever talks to it through this trait, which keeps the core testable
//! against an in-memory stand-in.

use crate::types::{
    CpuArch, GuestOs, MachineId, MachineInfo, Priority, SlaClass, TaskId, TaskRequirements, VmId,
};

/// Simulator primitives consumed by the scheduler core.
///
/// Queries take `&self`; anything that changes simulated cluster state
/// takes `&mut self`. The driver invokes one scheduler callback at a time,
/// so implementations never see concurrent calls.
pub trait SimHost {
    /// Number of physical machines in the cluster.
    fn total_machines(&self) -> u32;

    /// CPU architecture of a machine. Immutable for the run.
    fn cpu_arch(&self, machine: MachineId) -> CpuArch;

    /// Current resource snapshot for a machine.
    fn machine_info(&self, machine: MachineId) -> MachineInfo;

    /// Cumulative cluster energy in KW-hour.
    fn cluster_energy(&self) -> f64;

    /// Create a VM of the given guest OS on the given architecture.
    fn create_vm(&mut self, os: GuestOs, arch: CpuArch) -> VmId;

    /// Attach a created VM to a machine.
    fn attach_vm(&mut self, vm: VmId, machine: MachineId);

    /// Request shutdown of a VM.
    fn shutdown_vm(&mut self, vm: VmId);

    /// Submit a task to a VM's run queue at the given priority.
    fn add_task(&mut self, vm: VmId, task: TaskId, priority: Priority);

    /// Requirements of an arriving task.
    fn task_requirements(&self, task: TaskId) -> TaskRequirements;

    /// Whether a task has already run to completion.
    fn is_task_complete(&self, task: TaskId) -> bool;

    /// Change the dispatch priority of a pending task.
    fn set_task_priority(&mut self, task: TaskId, priority: Priority);

    /// Report that no compatible host exists for a task. The simulator
    /// decides what happens to the task afterwards.
    fn report_incompatible(&mut self, message: &str, task: TaskId);

    /// SLA violation percentage for a class, for the end-of-run report.
    fn sla_report(&self, class: SlaClass) -> f64;
}
