use crate::ROM_BANK_SIZE;

/// Smallest image that still contains a full header.
pub const HEADER_END: usize = 0x150;

const TITLE: std::ops::Range<usize> = 0x134..0x144;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;

/// Fields of the cartridge header at 0x0100-0x014F.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
}

impl CartridgeHeader {
    /// Parse the header. The caller guarantees `rom.len() >= HEADER_END`.
    pub(super) fn parse(rom: &[u8]) -> Self {
        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string();

        Self {
            title,
            cartridge_type: rom[CARTRIDGE_TYPE],
            rom_size_code: rom[ROM_SIZE],
            ram_size_code: rom[RAM_SIZE],
        }
    }

    /// ROM size declared by the header, or `None` for an unknown code.
    ///
    /// Codes 0x00..=0x08 encode 32 KiB << code.
    pub fn rom_size(&self) -> Option<usize> {
        match self.rom_size_code {
            code @ 0x00..=0x08 => Some((2 * ROM_BANK_SIZE) << code),
            _ => None,
        }
    }

    /// External RAM size declared by the header, or `None` for an unknown
    /// code.
    pub fn ram_size(&self) -> Option<usize> {
        match self.ram_size_code {
            0x00 => Some(0),
            0x01 => Some(0x800),
            0x02 => Some(0x2000),
            0x03 => Some(0x8000),
            0x04 => Some(0x20000),
            0x05 => Some(0x10000),
            _ => None,
        }
    }

    /// Whether the cartridge type carries a battery, i.e. its RAM is meant
    /// to be persisted by the host.
    pub fn has_battery(&self) -> bool {
        matches!(
            self.cartridge_type,
            0x03 | 0x06 | 0x09 | 0x0D | 0x0F | 0x10 | 0x13 | 0x1B | 0x1E | 0x22 | 0xFF
        )
    }
}
