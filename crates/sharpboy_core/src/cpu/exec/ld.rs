use crate::cpu::decode::{Indirect, Op, Operand8};
use crate::cpu::{Bus, Cpu, Reg16};
use crate::error::Fault;

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, rr: Reg16) -> Result<(), Fault> {
        let value = self.fetch16(bus)?;
        self.regs.set16(rr, value);
        Ok(())
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, dst: Operand8) -> Result<(), Fault> {
        let value = self.fetch8(bus)?;
        self.write_operand(bus, dst, value)
    }

    pub(super) fn exec_ld_r_r<B: Bus>(
        &mut self,
        bus: &mut B,
        dst: Operand8,
        src: Operand8,
    ) -> Result<(), Fault> {
        let value = self.read_operand(bus, src)?;
        self.write_operand(bus, dst, value)
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> Result<(), Fault> {
        let addr = self.fetch16(bus)?;
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo)?;
        bus.write8(addr.wrapping_add(1), hi)?;
        Ok(())
    }

    /// LDH (a8),A / LDH A,(a8)
    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, op: Op) -> Result<(), Fault> {
        debug_assert!(matches!(op, Op::LdhA8A | Op::LdhAA8));

        let offset = self.fetch8(bus)? as u16;
        let addr = 0xFF00 | offset;
        if op == Op::LdhA8A {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr)?;
        }
        Ok(())
    }

    /// LD (C),A / LD A,(C)
    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, op: Op) -> Result<(), Fault> {
        debug_assert!(matches!(op, Op::LdhCA | Op::LdhAC));

        let addr = 0xFF00 | self.regs.c as u16;
        if op == Op::LdhCA {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr)?;
        }
        Ok(())
    }

    /// LD (a16),A / LD A,(a16)
    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, op: Op) -> Result<(), Fault> {
        debug_assert!(matches!(op, Op::LdA16A | Op::LdAA16));

        let addr = self.fetch16(bus)?;
        if op == Op::LdA16A {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr)?;
        }
        Ok(())
    }

    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> Result<(), Fault> {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a)?;
        Ok(())
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> Result<(), Fault> {
        let addr = self.indirect_addr(ind);
        self.regs.a = bus.read8(addr)?;
        Ok(())
    }
}
