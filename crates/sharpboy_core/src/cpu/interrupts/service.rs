use crate::error::Fault;

use super::super::{Bus, Cpu, CpuState};
use super::{Interrupt, IE_ADDR, IF_ADDR};

impl Cpu {
    /// Handle maskable interrupts at an instruction boundary.
    ///
    /// Any pending enabled interrupt wakes a halted CPU. When IME is set the
    /// highest-priority one is dispatched and `Some(cycles)` is returned.
    pub(in crate::cpu) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Result<Option<u32>, Fault> {
        let ie = bus.read8(IE_ADDR)?;
        let iflags = bus.read8(IF_ADDR)?;
        let Some(irq) = Interrupt::highest(ie & iflags & 0x1F) else {
            return Ok(None);
        };

        if self.state == CpuState::Halted {
            self.state = CpuState::Running;
        }

        if !self.gate.is_enabled() {
            return Ok(None);
        }

        self.gate.disable();
        bus.write8(IF_ADDR, iflags & !irq.mask())?;
        let pc = self.regs.pc;
        self.push_u16(bus, pc)?;
        self.regs.pc = irq.vector();

        log::debug!("servicing {irq:?} from 0x{pc:04X} -> 0x{:04X}", irq.vector());
        Ok(Some(20))
    }
}
