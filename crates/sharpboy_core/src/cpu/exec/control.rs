use crate::cpu::decode::Cond;
use crate::cpu::{Bus, Cpu};
use crate::error::Fault;

impl Cpu {
    #[inline]
    pub(super) fn condition(&self, cc: Cond) -> bool {
        let flags = self.regs.f;
        match cc {
            Cond::Nz => !flags.zero(),
            Cond::Z => flags.zero(),
            Cond::Nc => !flags.carry(),
            Cond::C => flags.carry(),
        }
    }

    /// Relative jump helper used by JR/JR cc.
    ///
    /// The displacement is a signed 8-bit offset relative to the address
    /// following the operand. Returns whether the jump was taken.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Result<bool, Fault> {
        let offset = self.fetch8(bus)? as i8;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
        }
        Ok(cond)
    }

    /// Absolute jump helper used by JP a16 / JP cc,a16.
    pub(super) fn jp_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Result<bool, Fault> {
        let addr = self.fetch16(bus)?;
        if cond {
            self.regs.pc = addr;
        }
        Ok(cond)
    }

    /// Call helper used by CALL a16 / CALL cc,a16.
    ///
    /// The pushed return address is the instruction following the call.
    pub(super) fn call_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Result<bool, Fault> {
        let addr = self.fetch16(bus)?;
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret)?;
            self.regs.pc = addr;
        }
        Ok(cond)
    }

    /// Return helper used by RET / RET cc.
    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Result<bool, Fault> {
        if cond {
            self.regs.pc = self.pop_u16(bus)?;
        }
        Ok(cond)
    }
}
