use std::collections::HashMap;

use tracing::debug;

use gridsched_core::platform::SimHost;
use gridsched_core::types::{GuestOs, MachineId, VmId};

/// Lazily materialized guest VMs, one per (machine, guest OS) pair.
///
/// The first task needing a pair pays the creation cost; later tasks reuse
/// the handle. Entries live until the shutdown sweep at end of run.
#[derive(Default)]
pub struct VmCache {
    vms: HashMap<(MachineId, GuestOs), VmId>,
}

impl VmCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the VM hosting `os` on `machine`, creating and attaching it
    /// on first need. The VM is created with the machine's own
    /// architecture, so a cached entry is always architecture-consistent
    /// with its host.
    pub fn ensure(&mut self, sim: &mut dyn SimHost, machine: MachineId, os: GuestOs) -> VmId {
        if let Some(&vm) = self.vms.get(&(machine, os)) {
            return vm;
        }

        let arch = sim.cpu_arch(machine);
        let vm = sim.create_vm(os, arch);
        sim.attach_vm(vm, machine);
        self.vms.insert((machine, os), vm);
        debug!("Created {} VM {} on machine {} ({})", os, vm, machine, arch);
        vm
    }

    /// Request shutdown of every VM this cache created.
    pub fn shutdown_all(&self, sim: &mut dyn SimHost) {
        for &vm in self.vms.values() {
            sim.shutdown_vm(vm);
        }
    }

    pub fn len(&self) -> usize {
        self.vms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vms.is_empty()
    }
}
