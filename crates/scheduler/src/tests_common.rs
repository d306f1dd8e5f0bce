use std::collections::{HashMap, HashSet};

use gridsched_core::platform::SimHost;
use gridsched_core::types::{
    CpuArch, GuestOs, MachineId, MachineInfo, Priority, SlaClass, TaskId, TaskRequirements, VmId,
};

use crate::PlacementRequest;

/// Machine description for fixtures.
#[derive(Debug, Clone)]
pub struct MachineSpec {
    pub arch: CpuArch,
    pub memory_size_mb: u64,
    pub gpus: u32,
    pub active_tasks: u32,
    pub performance: Vec<u64>,
}

pub fn machine(arch: CpuArch, memory_size_mb: u64, gpus: u32) -> MachineSpec {
    MachineSpec {
        arch,
        memory_size_mb,
        gpus,
        active_tasks: 0,
        performance: vec![1_000_000],
    }
}

pub fn task(
    vm_type: GuestOs,
    cpu_arch: CpuArch,
    gpu_required: bool,
    memory_mb: u64,
) -> TaskRequirements {
    TaskRequirements {
        vm_type,
        cpu_arch,
        gpu_required,
        memory_mb,
        total_instructions: 1_000_000,
        sla: SlaClass::Sla2,
    }
}

pub fn placement_request(arch: CpuArch, needs_gpu: bool, memory_mb: u64) -> PlacementRequest {
    PlacementRequest {
        arch,
        needs_gpu,
        memory_mb,
        instructions: 1_000_000,
    }
}

/// In-memory simulator stand-in recording everything the scheduler does
/// to it, so tests can assert on the full observable surface.
#[derive(Default)]
pub struct SimFixture {
    pub machines: Vec<MachineSpec>,
    pub tasks: HashMap<TaskId, TaskRequirements>,
    pub completed: HashSet<TaskId>,
    /// (vm, os, arch) per creation, in order. Ids start at 1; 0 stays
    /// reserved the way the simulator reserves it.
    pub created: Vec<(VmId, GuestOs, CpuArch)>,
    pub attached: HashMap<VmId, MachineId>,
    /// (vm, task, priority) per submission, in order.
    pub submitted: Vec<(VmId, TaskId, Priority)>,
    pub shut_down: Vec<VmId>,
    pub priority_changes: Vec<(TaskId, Priority)>,
    pub rejections: Vec<(String, TaskId)>,
    pub energy_kwh: f64,
    pub sla_pct: HashMap<SlaClass, f64>,
    next_vm: VmId,
}

impl SimFixture {
    pub fn new(machines: Vec<MachineSpec>) -> Self {
        Self {
            machines,
            ..Self::default()
        }
    }

    pub fn register_task(&mut self, id: TaskId, req: TaskRequirements) {
        self.tasks.insert(id, req);
    }

    /// Machine a submitted task landed on, resolved through the VM it was
    /// added to.
    pub fn machine_of(&self, task: TaskId) -> Option<MachineId> {
        let vm = self
            .submitted
            .iter()
            .find(|&&(_, t, _)| t == task)
            .map(|&(vm, _, _)| vm)?;
        self.attached.get(&vm).copied()
    }
}

impl SimHost for SimFixture {
    fn total_machines(&self) -> u32 {
        self.machines.len() as u32
    }

    fn cpu_arch(&self, machine: MachineId) -> CpuArch {
        self.machines[machine as usize].arch
    }

    fn machine_info(&self, machine: MachineId) -> MachineInfo {
        let spec = &self.machines[machine as usize];
        MachineInfo {
            memory_size_mb: spec.memory_size_mb,
            gpus: spec.gpus,
            active_tasks: spec.active_tasks,
            performance: spec.performance.clone(),
        }
    }

    fn cluster_energy(&self) -> f64 {
        self.energy_kwh
    }

    fn create_vm(&mut self, os: GuestOs, arch: CpuArch) -> VmId {
        self.next_vm += 1;
        self.created.push((self.next_vm, os, arch));
        self.next_vm
    }

    fn attach_vm(&mut self, vm: VmId, machine: MachineId) {
        self.attached.insert(vm, machine);
    }

    fn shutdown_vm(&mut self, vm: VmId) {
        self.shut_down.push(vm);
    }

    fn add_task(&mut self, vm: VmId, task: TaskId, priority: Priority) {
        self.submitted.push((vm, task, priority));
    }

    fn task_requirements(&self, task: TaskId) -> TaskRequirements {
        self.tasks[&task].clone()
    }

    fn is_task_complete(&self, task: TaskId) -> bool {
        self.completed.contains(&task)
    }

    fn set_task_priority(&mut self, task: TaskId, priority: Priority) {
        self.priority_changes.push((task, priority));
    }

    fn report_incompatible(&mut self, message: &str, task: TaskId) {
        self.rejections.push((message.to_string(), task));
    }

    fn sla_report(&self, class: SlaClass) -> f64 {
        self.sla_pct.get(&class).copied().unwrap_or(0.0)
    }
}
