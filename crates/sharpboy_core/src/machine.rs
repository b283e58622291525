//! The Game Boy outside the CPU: memory map, cartridge, video registers and
//! the aggregate that drives them.

mod bus;
mod cartridge;
mod gameboy;
mod map;
mod video;

pub use bus::MemoryBus;
pub use cartridge::{Cartridge, CartridgeHeader};
pub use gameboy::GameBoy;
pub use map::Region;
pub use video::{Lcdc, Shade, Video};

/// Work RAM size (DMG, 8 KiB).
pub const WRAM_SIZE: usize = 0x2000;
/// High RAM size (0xFF80..=0xFFFE).
pub const HRAM_SIZE: usize = 0x7F;
/// I/O register block size (0xFF00..=0xFF7F).
pub const IO_SIZE: usize = 0x80;
