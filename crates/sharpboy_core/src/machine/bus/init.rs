use crate::machine::video::Video;

use super::MemoryBus;

/// I/O register values visible when the DMG boot ROM hands over to the
/// cartridge at 0x0100. Registers not listed read back as 0.
const DMG_POST_BOOT_IO: &[(u16, u8)] = &[
    // Joypad, serial control.
    (0xFF00, 0xCF),
    (0xFF02, 0x7E),
    // Divider / timer.
    (0xFF04, 0xAB),
    (0xFF07, 0xF8),
    // Sound.
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
    // LCD.
    (0xFF40, 0x91),
    (0xFF41, 0x85),
    (0xFF46, 0xFF),
    (0xFF47, 0xFC),
];

impl MemoryBus {
    /// Initialize I/O registers to match the DMG post-boot state.
    pub fn apply_dmg_initial_io_state(&mut self) {
        for &(addr, value) in DMG_POST_BOOT_IO {
            self.write_io(addr, value);
        }
        // The boot ROM leaves a VBlank request pending.
        self.if_reg = 0x01;
        self.ie_reg = 0x00;
    }

    /// Clear RAM and registers and restore the cartridge's bank selection.
    /// The ROM image and external RAM are kept.
    pub fn reset(&mut self) {
        self.video = Video::default();
        self.wram.fill(0);
        self.hram.fill(0);
        self.io.fill(0);
        self.if_reg = 0;
        self.ie_reg = 0;
        self.cartridge.reset_bank();
    }
}
