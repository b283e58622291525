use crate::cpu::{Bus, Interrupt};
use crate::error::MemoryAccessFault;

use super::{Cartridge, Video, HRAM_SIZE, IO_SIZE, WRAM_SIZE};

mod init;
mod mmio;

/// The DMG memory map.
///
/// Owns work RAM, high RAM, the plain I/O register bytes, IF and IE; the
/// cartridge and video collaborators own their own storage.
#[derive(Clone, Debug)]
pub struct MemoryBus {
    cartridge: Cartridge,
    video: Video,
    wram: Box<[u8; WRAM_SIZE]>,
    hram: [u8; HRAM_SIZE],
    /// I/O registers without a dedicated owner.
    io: [u8; IO_SIZE],
    /// IF, lower 5 bits only; reads OR in 0xE0.
    if_reg: u8,
    ie_reg: u8,
}

impl MemoryBus {
    /// A bus with zeroed RAM and registers.
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            cartridge,
            video: Video::default(),
            wram: Box::new([0; WRAM_SIZE]),
            hram: [0; HRAM_SIZE],
            io: [0; IO_SIZE],
            if_reg: 0,
            ie_reg: 0,
        }
    }

    #[inline]
    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    #[inline]
    pub fn cartridge_mut(&mut self) -> &mut Cartridge {
        &mut self.cartridge
    }

    #[inline]
    pub fn video(&self) -> &Video {
        &self.video
    }

    #[inline]
    pub fn video_mut(&mut self) -> &mut Video {
        &mut self.video
    }

    /// IF as the CPU reads it.
    #[inline]
    pub fn interrupt_flags(&self) -> u8 {
        self.if_reg | 0xE0
    }

    #[inline]
    pub fn interrupt_enable(&self) -> u8 {
        self.ie_reg
    }

    /// Raise an interrupt request line (set its IF bit).
    pub fn request_interrupt(&mut self, irq: Interrupt) {
        self.if_reg |= irq.mask();
        log::trace!("interrupt requested: {irq:?}");
    }
}

impl Bus for MemoryBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> Result<u8, MemoryAccessFault> {
        self.read8_mmio(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) -> Result<(), MemoryAccessFault> {
        self.write8_mmio(addr, value)
    }
}
