use crate::cpu::decode::Operand8;
use crate::cpu::{Bus, Cpu, Reg16};
use crate::error::Fault;

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, target: Operand8) -> Result<(), Fault> {
        match target {
            Operand8::Reg(reg) => {
                let value = self.alu_inc8(self.regs.get(reg));
                self.regs.set(reg, value);
            }
            Operand8::HlInd => {
                let old = bus.increment8(self.regs.hl())?;
                self.alu_inc8(old);
            }
        }
        Ok(())
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, target: Operand8) -> Result<(), Fault> {
        match target {
            Operand8::Reg(reg) => {
                let value = self.alu_dec8(self.regs.get(reg));
                self.regs.set(reg, value);
            }
            Operand8::HlInd => {
                let old = bus.decrement8(self.regs.hl())?;
                self.alu_dec8(old);
            }
        }
        Ok(())
    }

    /// INC rr; no flags.
    pub(super) fn exec_inc16(&mut self, rr: Reg16) {
        let value = self.regs.get16(rr).wrapping_add(1);
        self.regs.set16(rr, value);
    }

    /// DEC rr; no flags.
    pub(super) fn exec_dec16(&mut self, rr: Reg16) {
        let value = self.regs.get16(rr).wrapping_sub(1);
        self.regs.set16(rr, value);
    }
}
