use crate::cpu::IF_ADDR;
use crate::error::MemoryAccessFault;
use crate::machine::video::{LCD_REGS_END, LCD_REGS_START};
use crate::machine::Region;

use super::MemoryBus;

/// Value read from the unusable block 0xFEA0-0xFEFF.
const UNUSABLE_FILL: u8 = 0xFF;

impl MemoryBus {
    pub(super) fn read8_mmio(&mut self, addr: u16) -> Result<u8, MemoryAccessFault> {
        let region = Region::decode(addr);
        let value = match region {
            Region::RomBank0 | Region::RomBankN => self.cartridge.read(addr),
            Region::VideoRam => self.video.read_vram(addr),
            Region::ExternalRam => self.cartridge.read_ram(addr),
            Region::WorkRam => self.wram[region.offset(addr)],
            Region::Echo => self.wram[Region::Echo.offset(addr)],
            Region::Oam => self.video.read_oam(addr),
            Region::Unusable => UNUSABLE_FILL,
            Region::Io => self.read_io(addr),
            Region::HighRam => self.hram[region.offset(addr)],
            Region::InterruptEnable => self.ie_reg,
        };
        Ok(value)
    }

    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) -> Result<(), MemoryAccessFault> {
        let region = Region::decode(addr);
        match region {
            Region::RomBank0 | Region::RomBankN => self.write_rom_control(addr, value),
            Region::VideoRam => self.video.write_vram(addr, value),
            Region::ExternalRam => self.cartridge.write_ram(addr, value),
            Region::WorkRam => self.wram[region.offset(addr)] = value,
            Region::Echo => self.wram[Region::Echo.offset(addr)] = value,
            Region::Oam => self.video.write_oam(addr, value),
            Region::Unusable => {}
            Region::Io => self.write_io(addr, value),
            Region::HighRam => self.hram[region.offset(addr)] = value,
            Region::InterruptEnable => self.ie_reg = value,
        }
        Ok(())
    }

    /// Writes into the ROM window never reach storage.
    fn write_rom_control(&mut self, addr: u16, value: u8) {
        match addr {
            0x2000..=0x3FFF => self.cartridge.select_bank(value),
            _ => log::warn!(
                "ignoring write 0x{value:02X} to reserved controller range at 0x{addr:04X}"
            ),
        }
    }

    pub(super) fn read_io(&self, addr: u16) -> u8 {
        match addr {
            IF_ADDR => self.interrupt_flags(),
            LCD_REGS_START..=LCD_REGS_END => self.video.read_register(addr),
            _ => self.io[Region::Io.offset(addr)],
        }
    }

    pub(super) fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            IF_ADDR => self.if_reg = value & 0x1F,
            LCD_REGS_START..=LCD_REGS_END => self.video.write_register(addr, value),
            _ => self.io[Region::Io.offset(addr)] = value,
        }
    }
}
