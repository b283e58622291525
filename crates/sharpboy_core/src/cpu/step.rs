use crate::error::Fault;

use super::decode::{Op, PRIMARY};
use super::{Bus, Cpu, CpuState};

impl Cpu {
    /// Execute a single instruction (or interrupt entry, or one idle HALT
    /// slot) and return the number of T-cycles taken.
    ///
    /// Once the CPU has faulted every further call returns the same fault
    /// and changes nothing.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Fault> {
        if let CpuState::Faulted(fault) = &self.state {
            return Err(fault.clone());
        }

        match self.step_inner(bus) {
            Ok(cycles) => {
                self.cycles += cycles as u64;
                bus.tick(cycles);
                Ok(cycles)
            }
            Err(fault) => {
                log::error!("cpu fault: {fault}\n{}", self.regs);
                self.state = CpuState::Faulted(fault.clone());
                Err(fault)
            }
        }
    }

    fn step_inner<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Fault> {
        if let Some(cycles) = self.handle_interrupts(bus)? {
            return Ok(cycles);
        }

        if self.state == CpuState::Halted {
            // In HALT the CPU idles one M-cycle at a time until an interrupt
            // becomes pending.
            return Ok(4);
        }

        self.instr_addr = self.regs.pc;
        let opcode = self.fetch8(bus)?;
        let op = PRIMARY[opcode as usize].op;
        if op != Op::PrefixCb && log::log_enabled!(log::Level::Trace) {
            log::trace!("{:04X}: {op}", self.instr_addr);
        }

        let cycles = self.exec_opcode(bus, opcode)?;
        self.gate.advance();
        Ok(cycles)
    }

    /// Address of the most recently fetched instruction.
    #[inline]
    pub fn instr_addr(&self) -> u16 {
        self.instr_addr
    }
}
