use crate::cpu::{Bus, Cpu, CpuState};
use crate::error::Fault;

impl Cpu {
    /// STOP is officially a 2-byte instruction; the second byte is often 0
    /// and ignored. The padding byte is fetched so PC matches hardware when
    /// the fault is reported.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> Result<(), Fault> {
        let _padding = self.fetch8(bus)?;
        Ok(())
    }

    /// HALT: idle until an enabled interrupt becomes pending.
    pub(super) fn exec_halt(&mut self) {
        self.state = CpuState::Halted;
    }
}
