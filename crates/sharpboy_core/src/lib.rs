//! Sharp LR35902 (Game Boy) instruction core.
//!
//! [`Cpu`] executes one instruction per [`Cpu::step`] against any [`Bus`];
//! [`MemoryBus`] is the DMG memory map and [`GameBoy`] owns both.

pub mod cpu;
pub mod error;
pub mod machine;

pub use cpu::{
    Bus, Cpu, CpuState, Flags, Interrupt, InterruptGate, Reg16, Reg8, RegPair, Registers, IE_ADDR,
    IF_ADDR,
};
pub use error::{Access, CartridgeLoadError, Fault, MemoryAccessFault, Opcode};
pub use machine::{Cartridge, CartridgeHeader, GameBoy, Lcdc, MemoryBus, Region, Shade, Video};

/// Size of one switchable ROM bank (16 KiB).
pub const ROM_BANK_SIZE: usize = 0x4000;
