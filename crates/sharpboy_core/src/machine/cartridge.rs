mod header;

use std::fs;
use std::path::Path;

pub use header::CartridgeHeader;
use header::HEADER_END;

use crate::error::CartridgeLoadError;
use crate::ROM_BANK_SIZE;

/// Size of the external RAM window at 0xA000-0xBFFF.
const RAM_WINDOW: usize = 0x2000;

/// ROM image plus the minimal bank controller.
///
/// Writes to 0x2000-0x3FFF select the bank mapped at 0x4000-0x7FFF. External
/// RAM is allocated when the header declares it; only its first 8 KiB window
/// is addressable since RAM banking is not modelled.
#[derive(Clone, Debug)]
pub struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    header: CartridgeHeader,
    bank_count: usize,
    current_bank: usize,
}

impl Cartridge {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CartridgeLoadError> {
        let path = path.as_ref();
        let rom = fs::read(path).map_err(|source| CartridgeLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(rom)
    }

    pub fn from_bytes(rom: Vec<u8>) -> Result<Self, CartridgeLoadError> {
        if rom.is_empty() {
            return Err(CartridgeLoadError::Empty);
        }
        if rom.len() < HEADER_END {
            return Err(CartridgeLoadError::Truncated {
                len: rom.len(),
                expected: HEADER_END,
            });
        }

        let header = CartridgeHeader::parse(&rom);
        match header.rom_size() {
            Some(expected) if rom.len() < expected => {
                return Err(CartridgeLoadError::Truncated {
                    len: rom.len(),
                    expected,
                });
            }
            Some(_) => {}
            None => log::warn!(
                "unknown ROM size code 0x{:02X}, using image length",
                header.rom_size_code
            ),
        }

        let ram_size = header.ram_size().unwrap_or_else(|| {
            log::warn!(
                "unknown RAM size code 0x{:02X}, assuming no external RAM",
                header.ram_size_code
            );
            0
        });

        let bank_count = rom.len().div_ceil(ROM_BANK_SIZE).max(1);
        log::info!(
            "loaded cartridge '{}': type 0x{:02X}, {} ROM banks, {} bytes RAM",
            header.title,
            header.cartridge_type,
            bank_count,
            ram_size
        );

        Ok(Self {
            rom,
            ram: vec![0xFF; ram_size],
            header,
            bank_count,
            current_bank: 1,
        })
    }

    #[inline]
    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.header.title
    }

    /// Number of 16 KiB banks in the image.
    #[inline]
    pub fn bank_count(&self) -> usize {
        self.bank_count
    }

    /// Bank currently mapped at 0x4000-0x7FFF.
    #[inline]
    pub fn current_bank(&self) -> usize {
        self.current_bank
    }

    /// Read a byte from the 0x0000-0x7FFF window.
    ///
    /// Offsets past the end of the image read as 0xFF.
    pub fn read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 { 0 } else { self.current_bank };
        let offset = (addr & 0x3FFF) as usize;
        let index = bank
            .saturating_mul(ROM_BANK_SIZE)
            .saturating_add(offset);
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    /// Bank-select command from a write to 0x2000-0x3FFF.
    ///
    /// The value is masked to the smallest power of two covering the bank
    /// count; a masked 0 selects bank 1, so bank 0 never appears in the
    /// switchable window.
    pub fn select_bank(&mut self, value: u8) {
        let mask = self.bank_count.next_power_of_two() - 1;
        self.current_bank = (value as usize & mask).max(1);
        log::debug!(
            "ROM bank select 0x{value:02X} -> bank {}",
            self.current_bank
        );
    }

    /// Back to the power-on bank selection.
    pub fn reset_bank(&mut self) {
        self.current_bank = 1;
    }

    /// Whether the header declared external RAM.
    #[inline]
    pub fn has_ram(&self) -> bool {
        !self.ram.is_empty()
    }

    /// Read external RAM at 0xA000-0xBFFF. Without RAM this reads 0xFF.
    pub fn read_ram(&self, addr: u16) -> u8 {
        let offset = (addr as usize).wrapping_sub(0xA000) % RAM_WINDOW;
        self.ram.get(offset).copied().unwrap_or(0xFF)
    }

    /// Write external RAM at 0xA000-0xBFFF. Without RAM this is a no-op.
    pub fn write_ram(&mut self, addr: u16, value: u8) {
        let offset = (addr as usize).wrapping_sub(0xA000) % RAM_WINDOW;
        if let Some(slot) = self.ram.get_mut(offset) {
            *slot = value;
        }
    }

    /// External RAM contents, for battery saves.
    #[inline]
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Restore external RAM from a save. Extra bytes are ignored and a short
    /// save leaves the remainder untouched.
    pub fn load_ram(&mut self, data: &[u8]) {
        if data.len() != self.ram.len() {
            log::warn!(
                "save RAM is {} bytes, cartridge has {}",
                data.len(),
                self.ram.len()
            );
        }
        let len = data.len().min(self.ram.len());
        self.ram[..len].copy_from_slice(&data[..len]);
    }
}
