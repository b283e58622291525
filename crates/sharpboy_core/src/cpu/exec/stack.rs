use crate::cpu::{Bus, Cpu, RegPair};
use crate::error::Fault;

impl Cpu {
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, pair: RegPair) -> Result<(), Fault> {
        let value = self.pop_u16(bus)?;
        // POP AF drops the low nibble of F via `set_af`.
        self.regs.set_pair(pair, value);
        Ok(())
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) -> Result<(), Fault> {
        debug_assert!(vector & !0x38 == 0, "bad RST vector {vector:#04x}");

        let ret = self.regs.pc;
        self.push_u16(bus, ret)?;
        self.regs.pc = vector as u16;
        Ok(())
    }

    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> Result<(), Fault> {
        self.regs.pc = self.pop_u16(bus)?;
        self.gate.enable();
        Ok(())
    }
}
