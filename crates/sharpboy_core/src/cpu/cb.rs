use crate::error::Fault;

use super::decode::{CbOp, Operand8, EXTENDED};
use super::{Bus, Cpu};

impl Cpu {
    /// Handle CB-prefixed instructions (bit operations, shifts, and rotates).
    ///
    /// The returned cost includes the prefix fetch.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Fault> {
        let cb = self.fetch8(bus)?;
        let instr = &EXTENDED[cb as usize];
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{:04X}: {}", self.instr_addr, instr.op);
        }

        match instr.op {
            CbOp::Shift(op, Operand8::HlInd) => {
                let addr = self.regs.hl();
                bus.modify8(addr, |value| self.alu_shift(op, value))?;
            }
            CbOp::Shift(op, Operand8::Reg(reg)) => {
                let value = self.alu_shift(op, self.regs.get(reg));
                self.regs.set(reg, value);
            }
            CbOp::Bit(bit, target) => {
                let value = self.read_operand(bus, target)?;
                self.alu_bit(bit, value);
            }
            CbOp::Res(bit, target) => self.update_bit(bus, target, |value| value & !(1 << bit))?,
            CbOp::Set(bit, target) => self.update_bit(bus, target, |value| value | (1 << bit))?,
        }

        Ok(instr.cycles as u32)
    }

    /// RES/SET share this path; neither touches flags.
    fn update_bit<B: Bus>(
        &mut self,
        bus: &mut B,
        target: Operand8,
        f: impl FnOnce(u8) -> u8,
    ) -> Result<(), Fault> {
        match target {
            Operand8::Reg(reg) => {
                let value = f(self.regs.get(reg));
                self.regs.set(reg, value);
            }
            Operand8::HlInd => {
                bus.modify8(self.regs.hl(), f)?;
            }
        }
        Ok(())
    }
}
