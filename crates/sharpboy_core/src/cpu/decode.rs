//! Opcode tables.
//!
//! Both instruction spaces are plain data: one [`Instr`] descriptor per byte
//! value, built at compile time by the decoders below. Each descriptor names
//! a closed operation and its cycle cost; the interpreter executes exactly
//! that operation and nothing else.
//!
//! Decoding follows the usual x/y/z/p/q split of the opcode byte:
//! `x = op[7:6]`, `y = op[5:3]`, `z = op[2:0]`, `p = y >> 1`, `q = y & 1`.

use super::{Reg16, Reg8, RegPair};

/// 8-bit operand: a register or the byte at (HL).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand8 {
    Reg(Reg8),
    HlInd,
}

/// Address operand of `LD (rr),A` / `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indirect {
    BC,
    DE,
    /// (HL), then HL += 1.
    HlInc,
    /// (HL), then HL -= 1.
    HlDec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    Nz,
    Z,
    Nc,
    C,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

/// Operations of the primary (unprefixed) opcode space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    /// LD rr,d16
    LdR16Imm(Reg16),
    /// LD (rr),A
    LdIndirectA(Indirect),
    /// LD A,(rr)
    LdAIndirect(Indirect),
    Inc16(Reg16),
    Dec16(Reg16),
    Inc8(Operand8),
    Dec8(Operand8),
    /// LD r,d8
    Ld8Imm(Operand8),
    /// RLCA / RRCA / RLA / RRA.
    RotateA(ShiftOp),
    /// LD (a16),SP
    LdA16Sp,
    AddHl(Reg16),
    Stop,
    Jr,
    JrCond(Cond),
    Daa,
    Cpl,
    Scf,
    Ccf,
    /// LD dst,src
    Ld8(Operand8, Operand8),
    Halt,
    Alu(AluOp, Operand8),
    AluImm(AluOp),
    Ret,
    RetCond(Cond),
    Reti,
    Pop(RegPair),
    Push(RegPair),
    Jp,
    JpCond(Cond),
    JpHl,
    Call,
    CallCond(Cond),
    /// RST to the contained vector.
    Rst(u8),
    /// 0xCB: the next byte selects an entry of [`EXTENDED`].
    PrefixCb,
    /// LDH (a8),A
    LdhA8A,
    /// LDH A,(a8)
    LdhAA8,
    /// LD (C),A
    LdhCA,
    /// LD A,(C)
    LdhAC,
    /// LD (a16),A
    LdA16A,
    /// LD A,(a16)
    LdAA16,
    /// ADD SP,r8
    AddSpImm,
    /// LD HL,SP+r8
    LdHlSpImm,
    LdSpHl,
    Di,
    Ei,
    /// Opcode hole; executing it faults the CPU.
    Invalid,
}

/// Operations of the CB-prefixed opcode space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CbOp {
    Shift(ShiftOp, Operand8),
    Bit(u8, Operand8),
    Res(u8, Operand8),
    Set(u8, Operand8),
}

/// One opcode table entry.
///
/// `cycles` is the cost in T-cycles when a conditional operation is not
/// taken (and the only cost of unconditional ones); `cycles_taken` is the
/// cost of the taken branch. Extended entries include the prefix fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instr<O> {
    pub op: O,
    pub cycles: u8,
    pub cycles_taken: u8,
}

impl<O> Instr<O> {
    #[inline]
    pub fn cost(&self, taken: bool) -> u32 {
        if taken {
            self.cycles_taken as u32
        } else {
            self.cycles as u32
        }
    }

    #[inline]
    pub fn is_conditional(&self) -> bool {
        self.cycles != self.cycles_taken
    }
}

const fn plain<O>(op: O, cycles: u8) -> Instr<O> {
    Instr {
        op,
        cycles,
        cycles_taken: cycles,
    }
}

const fn branch(op: Op, untaken: u8, taken: u8) -> Instr<Op> {
    Instr {
        op,
        cycles: untaken,
        cycles_taken: taken,
    }
}

/// Register encoding shared by both tables:
/// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
const fn r8(index: u8) -> Operand8 {
    match index & 0x07 {
        0 => Operand8::Reg(Reg8::B),
        1 => Operand8::Reg(Reg8::C),
        2 => Operand8::Reg(Reg8::D),
        3 => Operand8::Reg(Reg8::E),
        4 => Operand8::Reg(Reg8::H),
        5 => Operand8::Reg(Reg8::L),
        6 => Operand8::HlInd,
        _ => Operand8::Reg(Reg8::A),
    }
}

const fn rp(index: u8) -> Reg16 {
    match index & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::SP,
    }
}

const fn rp2(index: u8) -> RegPair {
    match index & 0x03 {
        0 => RegPair::BC,
        1 => RegPair::DE,
        2 => RegPair::HL,
        _ => RegPair::AF,
    }
}

const fn cc(index: u8) -> Cond {
    match index & 0x03 {
        0 => Cond::Nz,
        1 => Cond::Z,
        2 => Cond::Nc,
        _ => Cond::C,
    }
}

const fn alu(index: u8) -> AluOp {
    match index & 0x07 {
        0 => AluOp::Add,
        1 => AluOp::Adc,
        2 => AluOp::Sub,
        3 => AluOp::Sbc,
        4 => AluOp::And,
        5 => AluOp::Xor,
        6 => AluOp::Or,
        _ => AluOp::Cp,
    }
}

const fn shift(index: u8) -> ShiftOp {
    match index & 0x07 {
        0 => ShiftOp::Rlc,
        1 => ShiftOp::Rrc,
        2 => ShiftOp::Rl,
        3 => ShiftOp::Rr,
        4 => ShiftOp::Sla,
        5 => ShiftOp::Sra,
        6 => ShiftOp::Swap,
        _ => ShiftOp::Srl,
    }
}

const fn decode_primary(opcode: u8) -> Instr<Op> {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    match x {
        0 => match z {
            0 => match y {
                0 => plain(Op::Nop, 4),
                1 => plain(Op::LdA16Sp, 20),
                2 => plain(Op::Stop, 4),
                3 => plain(Op::Jr, 12),
                _ => branch(Op::JrCond(cc(y - 4)), 8, 12),
            },
            1 => {
                if q == 0 {
                    plain(Op::LdR16Imm(rp(p)), 12)
                } else {
                    plain(Op::AddHl(rp(p)), 8)
                }
            }
            2 => {
                let ind = match p {
                    0 => Indirect::BC,
                    1 => Indirect::DE,
                    2 => Indirect::HlInc,
                    _ => Indirect::HlDec,
                };
                if q == 0 {
                    plain(Op::LdIndirectA(ind), 8)
                } else {
                    plain(Op::LdAIndirect(ind), 8)
                }
            }
            3 => {
                if q == 0 {
                    plain(Op::Inc16(rp(p)), 8)
                } else {
                    plain(Op::Dec16(rp(p)), 8)
                }
            }
            4 => plain(Op::Inc8(r8(y)), if y == 6 { 12 } else { 4 }),
            5 => plain(Op::Dec8(r8(y)), if y == 6 { 12 } else { 4 }),
            6 => plain(Op::Ld8Imm(r8(y)), if y == 6 { 12 } else { 8 }),
            _ => match y {
                0 => plain(Op::RotateA(ShiftOp::Rlc), 4),
                1 => plain(Op::RotateA(ShiftOp::Rrc), 4),
                2 => plain(Op::RotateA(ShiftOp::Rl), 4),
                3 => plain(Op::RotateA(ShiftOp::Rr), 4),
                4 => plain(Op::Daa, 4),
                5 => plain(Op::Cpl, 4),
                6 => plain(Op::Scf, 4),
                _ => plain(Op::Ccf, 4),
            },
        },
        1 => {
            if opcode == 0x76 {
                plain(Op::Halt, 4)
            } else {
                plain(
                    Op::Ld8(r8(y), r8(z)),
                    if y == 6 || z == 6 { 8 } else { 4 },
                )
            }
        }
        2 => plain(Op::Alu(alu(y), r8(z)), if z == 6 { 8 } else { 4 }),
        _ => match z {
            0 => match y {
                0..=3 => branch(Op::RetCond(cc(y)), 8, 20),
                4 => plain(Op::LdhA8A, 12),
                5 => plain(Op::AddSpImm, 16),
                6 => plain(Op::LdhAA8, 12),
                _ => plain(Op::LdHlSpImm, 12),
            },
            1 => {
                if q == 0 {
                    plain(Op::Pop(rp2(p)), 12)
                } else {
                    match p {
                        0 => plain(Op::Ret, 16),
                        1 => plain(Op::Reti, 16),
                        2 => plain(Op::JpHl, 4),
                        _ => plain(Op::LdSpHl, 8),
                    }
                }
            }
            2 => match y {
                0..=3 => branch(Op::JpCond(cc(y)), 12, 16),
                4 => plain(Op::LdhCA, 8),
                5 => plain(Op::LdA16A, 16),
                6 => plain(Op::LdhAC, 8),
                _ => plain(Op::LdAA16, 16),
            },
            3 => match y {
                0 => plain(Op::Jp, 16),
                1 => plain(Op::PrefixCb, 0),
                6 => plain(Op::Di, 4),
                7 => plain(Op::Ei, 4),
                // D3, DB, E3, EB
                _ => plain(Op::Invalid, 0),
            },
            4 => match y {
                0..=3 => branch(Op::CallCond(cc(y)), 12, 24),
                // E4, EC, F4, FC
                _ => plain(Op::Invalid, 0),
            },
            5 => {
                if q == 0 {
                    plain(Op::Push(rp2(p)), 16)
                } else if p == 0 {
                    plain(Op::Call, 24)
                } else {
                    // DD, ED, FD
                    plain(Op::Invalid, 0)
                }
            }
            6 => plain(Op::AluImm(alu(y)), 8),
            _ => plain(Op::Rst(y * 8), 16),
        },
    }
}

const fn decode_extended(opcode: u8) -> Instr<CbOp> {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let target = r8(z);
    let mem = z == 6;

    match x {
        0 => plain(CbOp::Shift(shift(y), target), if mem { 16 } else { 8 }),
        // BIT only reads (HL), so it is one M-cycle shorter than RMW forms.
        1 => plain(CbOp::Bit(y, target), if mem { 12 } else { 8 }),
        2 => plain(CbOp::Res(y, target), if mem { 16 } else { 8 }),
        _ => plain(CbOp::Set(y, target), if mem { 16 } else { 8 }),
    }
}

/// Primary opcode table, indexed by the first opcode byte.
pub static PRIMARY: [Instr<Op>; 256] = {
    let mut table = [plain(Op::Invalid, 0); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_primary(i as u8);
        i += 1;
    }
    table
};

/// Extended opcode table, indexed by the byte following 0xCB.
///
/// Every byte value decodes to an operation on this CPU.
pub static EXTENDED: [Instr<CbOp>; 256] = {
    let mut table = [plain(CbOp::Bit(0, Operand8::HlInd), 0); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_extended(i as u8);
        i += 1;
    }
    table
};
