//! Assembler mnemonics for opcode table entries.
//!
//! Immediate operands are shown by their width (`d8`, `d16`, `a8`, `a16`,
//! `r8`) since the descriptors do not carry operand values.

use std::fmt;

use super::decode::{AluOp, CbOp, Cond, Indirect, Op, Operand8, ShiftOp};
use super::{Reg16, Reg8, RegPair};

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg8::A => "A",
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::H => "H",
            Reg8::L => "L",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg16::BC => "BC",
            Reg16::DE => "DE",
            Reg16::HL => "HL",
            Reg16::SP => "SP",
        };
        f.write_str(name)
    }
}

impl fmt::Display for RegPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegPair::BC => "BC",
            RegPair::DE => "DE",
            RegPair::HL => "HL",
            RegPair::AF => "AF",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Operand8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand8::Reg(reg) => write!(f, "{reg}"),
            Operand8::HlInd => f.write_str("(HL)"),
        }
    }
}

impl fmt::Display for Indirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Indirect::BC => "(BC)",
            Indirect::DE => "(DE)",
            Indirect::HlInc => "(HL+)",
            Indirect::HlDec => "(HL-)",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cond::Nz => "NZ",
            Cond::Z => "Z",
            Cond::Nc => "NC",
            Cond::C => "C",
        };
        f.write_str(name)
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ShiftOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftOp::Rlc => "RLC",
            ShiftOp::Rrc => "RRC",
            ShiftOp::Rl => "RL",
            ShiftOp::Rr => "RR",
            ShiftOp::Sla => "SLA",
            ShiftOp::Sra => "SRA",
            ShiftOp::Swap => "SWAP",
            ShiftOp::Srl => "SRL",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Nop => f.write_str("NOP"),
            Op::LdR16Imm(rr) => write!(f, "LD {rr},d16"),
            Op::LdIndirectA(ind) => write!(f, "LD {ind},A"),
            Op::LdAIndirect(ind) => write!(f, "LD A,{ind}"),
            Op::Inc16(rr) => write!(f, "INC {rr}"),
            Op::Dec16(rr) => write!(f, "DEC {rr}"),
            Op::Inc8(r) => write!(f, "INC {r}"),
            Op::Dec8(r) => write!(f, "DEC {r}"),
            Op::Ld8Imm(r) => write!(f, "LD {r},d8"),
            Op::RotateA(op) => write!(f, "{op}A"),
            Op::LdA16Sp => f.write_str("LD (a16),SP"),
            Op::AddHl(rr) => write!(f, "ADD HL,{rr}"),
            Op::Stop => f.write_str("STOP"),
            Op::Jr => f.write_str("JR r8"),
            Op::JrCond(cc) => write!(f, "JR {cc},r8"),
            Op::Daa => f.write_str("DAA"),
            Op::Cpl => f.write_str("CPL"),
            Op::Scf => f.write_str("SCF"),
            Op::Ccf => f.write_str("CCF"),
            Op::Ld8(dst, src) => write!(f, "LD {dst},{src}"),
            Op::Halt => f.write_str("HALT"),
            Op::Alu(op, src) => write!(f, "{op}{src}"),
            Op::AluImm(op) => write!(f, "{op}d8"),
            Op::Ret => f.write_str("RET"),
            Op::RetCond(cc) => write!(f, "RET {cc}"),
            Op::Reti => f.write_str("RETI"),
            Op::Pop(rr) => write!(f, "POP {rr}"),
            Op::Push(rr) => write!(f, "PUSH {rr}"),
            Op::Jp => f.write_str("JP a16"),
            Op::JpCond(cc) => write!(f, "JP {cc},a16"),
            Op::JpHl => f.write_str("JP HL"),
            Op::Call => f.write_str("CALL a16"),
            Op::CallCond(cc) => write!(f, "CALL {cc},a16"),
            Op::Rst(vector) => write!(f, "RST {vector:02X}H"),
            Op::PrefixCb => f.write_str("PREFIX CB"),
            Op::LdhA8A => f.write_str("LDH (a8),A"),
            Op::LdhAA8 => f.write_str("LDH A,(a8)"),
            Op::LdhCA => f.write_str("LD (C),A"),
            Op::LdhAC => f.write_str("LD A,(C)"),
            Op::LdA16A => f.write_str("LD (a16),A"),
            Op::LdAA16 => f.write_str("LD A,(a16)"),
            Op::AddSpImm => f.write_str("ADD SP,r8"),
            Op::LdHlSpImm => f.write_str("LD HL,SP+r8"),
            Op::LdSpHl => f.write_str("LD SP,HL"),
            Op::Di => f.write_str("DI"),
            Op::Ei => f.write_str("EI"),
            Op::Invalid => f.write_str("???"),
        }
    }
}

impl fmt::Display for CbOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CbOp::Shift(op, target) => write!(f, "{op} {target}"),
            CbOp::Bit(bit, target) => write!(f, "BIT {bit},{target}"),
            CbOp::Res(bit, target) => write!(f, "RES {bit},{target}"),
            CbOp::Set(bit, target) => write!(f, "SET {bit},{target}"),
        }
    }
}
