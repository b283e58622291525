use crate::cpu::decode::{AluOp, Operand8, ShiftOp};
use crate::cpu::{Bus, Cpu};
use crate::error::Fault;

impl Cpu {
    fn apply_alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.alu_sub(value, false),
            AluOp::Sbc => self.alu_sub(value, true),
            AluOp::And => self.alu_and(value),
            AluOp::Xor => self.alu_xor(value),
            AluOp::Or => self.alu_or(value),
            AluOp::Cp => self.alu_cp(value),
        }
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP r,(HL)
    pub(super) fn exec_alu_reg<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: Operand8) -> Result<(), Fault> {
        let value = self.read_operand(bus, src)?;
        self.apply_alu(op, value);
        Ok(())
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP d8
    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, op: AluOp) -> Result<(), Fault> {
        let value = self.fetch8(bus)?;
        self.apply_alu(op, value);
        Ok(())
    }

    /// RLCA / RRCA / RLA / RRA.
    ///
    /// Same bit movement as the CB forms, but Z is always cleared.
    pub(super) fn exec_rotate_a(&mut self, op: ShiftOp) {
        debug_assert!(matches!(
            op,
            ShiftOp::Rlc | ShiftOp::Rrc | ShiftOp::Rl | ShiftOp::Rr
        ));
        self.regs.a = self.alu_shift(op, self.regs.a);
        self.regs.f.set_zero(false);
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> Result<(), Fault> {
        let imm = self.fetch8(bus)?;
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        Ok(())
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> Result<(), Fault> {
        let imm = self.fetch8(bus)?;
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        Ok(())
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.regs.f.set_half_carry(true);
        self.regs.f.set_subtract(true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.regs.f.set_carry(true);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_subtract(false);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.regs.f.carry();
        self.regs.f.set_carry(!carry);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_subtract(false);
    }
}
