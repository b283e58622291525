mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use crate::error::{Fault, Opcode};

use super::decode::{Op, PRIMARY};
use super::{Bus, Cpu};

impl Cpu {
    /// Decode and execute a single primary opcode and return the number of
    /// T-cycles it consumed.
    ///
    /// The opcode byte has already been fetched; operand bytes are fetched
    /// here by the operation itself.
    pub(super) fn exec_opcode<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32, Fault> {
        let instr = &PRIMARY[opcode as usize];

        let taken = match instr.op {
            Op::PrefixCb => return self.exec_cb(bus),

            Op::Invalid => {
                return Err(Fault::InvalidOpcode {
                    opcode: Opcode::Primary(opcode),
                    addr: self.instr_addr,
                })
            }

            Op::Stop => {
                self.exec_stop(bus)?;
                return Err(Fault::UnimplementedOpcode {
                    opcode: Opcode::Primary(opcode),
                    addr: self.instr_addr,
                });
            }

            // Control flow: the only operations with two cycle costs.
            Op::Jr => self.jr(bus, true)?,
            Op::JrCond(cc) => self.jr(bus, self.condition(cc))?,
            Op::Jp => self.jp_cond(bus, true)?,
            Op::JpCond(cc) => self.jp_cond(bus, self.condition(cc))?,
            Op::Call => self.call_cond(bus, true)?,
            Op::CallCond(cc) => self.call_cond(bus, self.condition(cc))?,
            Op::Ret => self.ret_cond(bus, true)?,
            Op::RetCond(cc) => self.ret_cond(bus, self.condition(cc))?,

            op => {
                self.exec_plain(bus, op)?;
                false
            }
        };

        Ok(instr.cost(taken))
    }

    /// Execute an operation that has a single cycle cost.
    fn exec_plain<B: Bus>(&mut self, bus: &mut B, op: Op) -> Result<(), Fault> {
        match op {
            Op::Nop => Ok(()),

            // Loads.
            Op::LdR16Imm(rr) => self.exec_ld_rr_d16(bus, rr),
            Op::LdIndirectA(ind) => self.exec_ld_indirect_a(bus, ind),
            Op::LdAIndirect(ind) => self.exec_ld_a_indirect(bus, ind),
            Op::Ld8Imm(dst) => self.exec_ld_r_d8(bus, dst),
            Op::Ld8(dst, src) => self.exec_ld_r_r(bus, dst, src),
            Op::LdA16Sp => self.exec_ld_a16_sp(bus),
            Op::LdhA8A | Op::LdhAA8 => self.exec_ldh_a8(bus, op),
            Op::LdhCA | Op::LdhAC => self.exec_ldh_c(bus, op),
            Op::LdA16A | Op::LdAA16 => self.exec_ld_a16_a(bus, op),
            Op::LdSpHl => {
                self.regs.sp = self.regs.hl();
                Ok(())
            }

            // INC/DEC.
            Op::Inc8(target) => self.exec_inc8(bus, target),
            Op::Dec8(target) => self.exec_dec8(bus, target),
            Op::Inc16(rr) => {
                self.exec_inc16(rr);
                Ok(())
            }
            Op::Dec16(rr) => {
                self.exec_dec16(rr);
                Ok(())
            }

            // ALU.
            Op::Alu(alu, src) => self.exec_alu_reg(bus, alu, src),
            Op::AluImm(alu) => self.exec_alu_imm(bus, alu),
            Op::RotateA(shift) => {
                self.exec_rotate_a(shift);
                Ok(())
            }
            Op::AddHl(rr) => {
                self.alu_add16_hl(self.regs.get16(rr));
                Ok(())
            }
            Op::AddSpImm => self.exec_add_sp_r8(bus),
            Op::LdHlSpImm => self.exec_ld_hl_sp_r8(bus),
            Op::Daa => {
                self.alu_daa();
                Ok(())
            }
            Op::Cpl => {
                self.exec_cpl();
                Ok(())
            }
            Op::Scf => {
                self.exec_scf();
                Ok(())
            }
            Op::Ccf => {
                self.exec_ccf();
                Ok(())
            }

            // Stack and jumps without a condition.
            Op::Push(pair) => self.push_u16(bus, self.regs.pair(pair)),
            Op::Pop(pair) => self.exec_pop(bus, pair),
            Op::Rst(vector) => self.exec_rst(bus, vector),
            Op::Reti => self.exec_reti(bus),
            Op::JpHl => {
                self.regs.pc = self.regs.hl();
                Ok(())
            }

            // System.
            Op::Halt => {
                self.exec_halt();
                Ok(())
            }
            Op::Di => {
                self.gate.disable();
                Ok(())
            }
            Op::Ei => {
                self.gate.schedule_enable();
                Ok(())
            }

            Op::Jr
            | Op::JrCond(_)
            | Op::Jp
            | Op::JpCond(_)
            | Op::Call
            | Op::CallCond(_)
            | Op::Ret
            | Op::RetCond(_)
            | Op::PrefixCb
            | Op::Stop
            | Op::Invalid => unreachable!("{op} is dispatched by exec_opcode"),
        }
    }
}
