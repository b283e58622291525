//! LR35902 interpreter.
//!
//! The CPU owns the register file, the interrupt master enable gate and the
//! cycle counter. Memory is reached only through the [`Bus`] trait, so the
//! same core runs against the full [`MemoryBus`](crate::MemoryBus) or a flat
//! test bus.

mod alu;
mod cb;
pub mod decode;
mod exec;
mod flags;
mod helpers;
mod init;
mod interrupts;
mod mnemonic;
mod regs;
mod step;

pub use decode::{AluOp, CbOp, Cond, Indirect, Instr, Op, Operand8, ShiftOp, EXTENDED, PRIMARY};
pub use flags::Flags;
pub use interrupts::{Interrupt, InterruptGate, IE_ADDR, IF_ADDR};
pub use regs::{Reg16, Reg8, RegPair, Registers};

use crate::error::{Fault, MemoryAccessFault};

/// Abstraction over the Game Boy bus (memory and IO).
///
/// Reads and writes are fallible: an address that no region answers
/// surfaces as a [`MemoryAccessFault`], which the interpreter turns into a
/// terminal fault.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> Result<u8, MemoryAccessFault>;
    fn write8(&mut self, addr: u16, value: u8) -> Result<(), MemoryAccessFault>;

    /// Advance bus-side peripherals by a given number of CPU cycles.
    ///
    /// Default implementation does nothing.
    fn tick(&mut self, _cycles: u32) {}

    /// Read-modify-write of a single byte.
    ///
    /// Performs exactly one `read8` and one `write8` and returns the value
    /// that was read.
    fn modify8<F: FnOnce(u8) -> u8>(&mut self, addr: u16, f: F) -> Result<u8, MemoryAccessFault> {
        let old = self.read8(addr)?;
        self.write8(addr, f(old))?;
        Ok(old)
    }

    /// Increment the byte at `addr` (wrapping) and return its old value.
    fn increment8(&mut self, addr: u16) -> Result<u8, MemoryAccessFault> {
        self.modify8(addr, |v| v.wrapping_add(1))
    }

    /// Decrement the byte at `addr` (wrapping) and return its old value.
    fn decrement8(&mut self, addr: u16) -> Result<u8, MemoryAccessFault> {
        self.modify8(addr, |v| v.wrapping_sub(1))
    }
}

/// Execution state of the interpreter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CpuState {
    #[default]
    Running,
    /// Entered by HALT; left when an enabled interrupt becomes pending.
    Halted,
    /// Terminal. Only a reset leaves this state.
    Faulted(Fault),
}

/// Game Boy CPU core.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable (IME).
    pub gate: InterruptGate,
    state: CpuState,
    /// Total T-cycles consumed since construction or the last reset.
    cycles: u64,
    /// Address of the instruction currently being executed.
    instr_addr: u16,
}

impl Cpu {
    #[inline]
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == CpuState::Running
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// The fault that stopped the CPU, if any.
    pub fn fault(&self) -> Option<&Fault> {
        match &self.state {
            CpuState::Faulted(fault) => Some(fault),
            _ => None,
        }
    }

    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.regs.f
    }
}

#[cfg(test)]
mod tests;
