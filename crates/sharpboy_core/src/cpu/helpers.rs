use crate::error::Fault;

use super::decode::Operand8;
use super::{Bus, Cpu};

impl Cpu {
    /// Read an 8-bit operand: a register or the byte at (HL).
    #[inline]
    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand8) -> Result<u8, Fault> {
        match operand {
            Operand8::Reg(reg) => Ok(self.regs.get(reg)),
            Operand8::HlInd => Ok(bus.read8(self.regs.hl())?),
        }
    }

    /// Write an 8-bit operand. The encoding matches `read_operand`.
    #[inline]
    pub(super) fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand8, value: u8) -> Result<(), Fault> {
        match operand {
            Operand8::Reg(reg) => self.regs.set(reg, value),
            Operand8::HlInd => bus.write8(self.regs.hl(), value)?,
        }
        Ok(())
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> Result<u8, Fault> {
        let value = bus.read8(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> Result<u16, Fault> {
        let lo = self.fetch8(bus)?;
        let hi = self.fetch8(bus)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) -> Result<(), Fault> {
        let [hi, lo] = value.to_be_bytes();
        // Stack grows downward. We want memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo)?;
        Ok(())
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> Result<u16, Fault> {
        let lo = bus.read8(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        Ok(u16::from_le_bytes([lo, hi]))
    }
}
