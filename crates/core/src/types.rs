use serde::{Deserialize, Serialize};

/// Machine identifier assigned by the simulator. Densely numbered from 0.
pub type MachineId = u32;

/// VM identifier returned by the simulator's VM creation primitive.
pub type VmId = u32;

/// Task identifier assigned by the simulator. Densely numbered from 0.
pub type TaskId = u64;

/// Simulated time in microseconds.
pub type SimTime = u64;

/// Upper bound on the number of machines the scheduler tracks.
/// Discovery clamps the simulator's machine count to this ceiling.
pub const MAX_MACHINES: u32 = 512;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CpuArch {
    X86,
    Arm,
    Power,
    RiscV,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GuestOs {
    Linux,
    LinuxRt,
    Win,
    Aix,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SlaClass {
    Sla0,
    Sla1,
    Sla2,
    Sla3,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Mid,
    Low,
}

impl SlaClass {
    /// Dispatch priority for a task of this SLA class.
    pub fn dispatch_priority(self) -> Priority {
        match self {
            SlaClass::Sla0 => Priority::High,
            SlaClass::Sla1 => Priority::Mid,
            SlaClass::Sla2 | SlaClass::Sla3 => Priority::Low,
        }
    }
}

/// Snapshot of a machine's resources as reported by the simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    pub memory_size_mb: u64,
    pub gpus: u32,
    /// Tasks currently running on the machine, across all VMs.
    pub active_tasks: u32,
    /// Peak instructions-per-second per P-state; element 0 is the peak
    /// used for runtime estimates.
    pub performance: Vec<u64>,
}

impl MachineInfo {
    /// Peak performance for runtime estimates. Never zero.
    pub fn peak_performance(&self) -> u64 {
        self.performance.first().copied().unwrap_or(0).max(1)
    }
}

/// Everything the scheduler needs to know about an arriving task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequirements {
    pub vm_type: GuestOs,
    pub cpu_arch: CpuArch,
    pub gpu_required: bool,
    pub memory_mb: u64,
    pub total_instructions: u64,
    pub sla: SlaClass,
}

// --- Display implementations ---

impl std::fmt::Display for CpuArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpuArch::X86 => write!(f, "x86"),
            CpuArch::Arm => write!(f, "arm"),
            CpuArch::Power => write!(f, "power"),
            CpuArch::RiscV => write!(f, "riscv"),
        }
    }
}

impl std::fmt::Display for GuestOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuestOs::Linux => write!(f, "linux"),
            GuestOs::LinuxRt => write!(f, "linux-rt"),
            GuestOs::Win => write!(f, "win"),
            GuestOs::Aix => write!(f, "aix"),
        }
    }
}

impl std::fmt::Display for SlaClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlaClass::Sla0 => write!(f, "SLA0"),
            SlaClass::Sla1 => write!(f, "SLA1"),
            SlaClass::Sla2 => write!(f, "SLA2"),
            SlaClass::Sla3 => write!(f, "SLA3"),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Mid => write!(f, "mid"),
            Priority::Low => write!(f, "low"),
        }
    }
}
