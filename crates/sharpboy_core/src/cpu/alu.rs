use super::decode::ShiftOp;
use super::{Cpu, Flags};

/// Flags and result of `a - value - carry_in`, shared by SUB/SBC/CP.
#[inline]
fn sub_with_flags(a: u8, value: u8, carry_in: u8) -> (u8, Flags) {
    let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in as i16;
    let full = a as i16 - value as i16 - carry_in as i16;
    let result = full as u8;

    let mut flags = Flags::SUBTRACT;
    flags.set_zero(result == 0);
    flags.set_half_carry(half < 0);
    flags.set_carry(full < 0);
    (result, flags)
}

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = (use_carry && self.regs.f.carry()) as u8;

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.a = result;

        let mut flags = Flags::empty();
        flags.set_zero(result == 0);
        flags.set_half_carry(half > 0x0F);
        flags.set_carry(full > 0xFF);
        self.regs.f = flags;
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let carry_in = (use_carry && self.regs.f.carry()) as u8;
        let (result, flags) = sub_with_flags(self.regs.a, value, carry_in);
        self.regs.a = result;
        self.regs.f = flags;
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        let (_, flags) = sub_with_flags(self.regs.a, value, 0);
        self.regs.f = flags;
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;

        let mut flags = Flags::HALF_CARRY;
        flags.set_zero(result == 0);
        self.regs.f = flags;
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;

        let mut flags = Flags::empty();
        flags.set_zero(result == 0);
        self.regs.f = flags;
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        let mut flags = Flags::empty();
        flags.set_zero(result == 0);
        self.regs.f = flags;
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N, and A to compute a correction value.
    /// Updates A, Z, H, C; leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let flags = self.regs.f;
        let mut adjust: u8 = if flags.carry() { 0x60 } else { 0x00 };
        if flags.half_carry() {
            adjust |= 0x06;
        }

        if !flags.subtract() {
            // After an addition.
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            // After a subtraction.
            a = a.wrapping_sub(adjust);
        }

        self.regs.f.set_carry(adjust >= 0x60);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_zero(a == 0);
        self.regs.a = a;
    }

    /// 8-bit increment helper used by INC r and INC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry((value & 0x0F) == 0x0F);
        result
    }

    /// 8-bit decrement helper used by DEC r and DEC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(true);
        self.regs.f.set_half_carry((value & 0x0F) == 0);
        result
    }

    /// 16-bit add helper for `ADD HL,rr`.
    ///
    /// Z is unaffected; N is cleared; H and C are updated based on the
    /// 16-bit addition.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry((hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.regs.f.set_carry(hl as u32 + value as u32 > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// 16-bit add helper for instructions that add a signed 8-bit immediate
    /// to a 16-bit base (ADD SP,r8 and LD HL,SP+r8).
    ///
    /// Z and N are cleared; H and C are computed from the unsigned low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        let mut flags = Flags::empty();
        flags.set_half_carry((base & 0x000F) + (offset & 0x000F) > 0x000F);
        flags.set_carry((base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        self.regs.f = flags;
        base.wrapping_add(offset)
    }

    /// Rotate/shift/swap helper shared by the CB-prefixed forms and the
    /// accumulator rotates.
    ///
    /// Z reflects the result, N and H are cleared, C receives the bit shifted
    /// out (SWAP clears it).
    pub(super) fn alu_shift(&mut self, op: ShiftOp, value: u8) -> u8 {
        let carry_in = self.regs.f.carry();
        let (result, carry_out) = match op {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => ((value << 1) | carry_in as u8, value & 0x80 != 0),
            ShiftOp::Rr => ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        };

        let mut flags = Flags::empty();
        flags.set_zero(result == 0);
        flags.set_carry(carry_out);
        self.regs.f = flags;
        result
    }

    /// BIT b,value: Z = bit clear, N = 0, H = 1, C preserved.
    #[inline]
    pub(super) fn alu_bit(&mut self, bit: u8, value: u8) {
        let set = value & (1 << bit) != 0;
        self.regs.f.set_zero(!set);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry(true);
    }
}
