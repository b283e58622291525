use std::ops::RangeInclusive;

/// Regions of the 16-bit address space.
///
/// Every address belongs to exactly one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// 0x0000-0x3FFF, cartridge bank 0.
    RomBank0,
    /// 0x4000-0x7FFF, selected cartridge bank.
    RomBankN,
    VideoRam,
    ExternalRam,
    WorkRam,
    /// 0xE000-0xFDFF, mirror of 0xC000-0xDDFF.
    Echo,
    Oam,
    Unusable,
    Io,
    HighRam,
    InterruptEnable,
}

impl Region {
    pub const ALL: [Region; 11] = [
        Region::RomBank0,
        Region::RomBankN,
        Region::VideoRam,
        Region::ExternalRam,
        Region::WorkRam,
        Region::Echo,
        Region::Oam,
        Region::Unusable,
        Region::Io,
        Region::HighRam,
        Region::InterruptEnable,
    ];

    pub const fn decode(addr: u16) -> Region {
        match addr {
            0x0000..=0x3FFF => Region::RomBank0,
            0x4000..=0x7FFF => Region::RomBankN,
            0x8000..=0x9FFF => Region::VideoRam,
            0xA000..=0xBFFF => Region::ExternalRam,
            0xC000..=0xDFFF => Region::WorkRam,
            0xE000..=0xFDFF => Region::Echo,
            0xFE00..=0xFE9F => Region::Oam,
            0xFEA0..=0xFEFF => Region::Unusable,
            0xFF00..=0xFF7F => Region::Io,
            0xFF80..=0xFFFE => Region::HighRam,
            0xFFFF => Region::InterruptEnable,
        }
    }

    pub const fn range(self) -> RangeInclusive<u16> {
        match self {
            Region::RomBank0 => 0x0000..=0x3FFF,
            Region::RomBankN => 0x4000..=0x7FFF,
            Region::VideoRam => 0x8000..=0x9FFF,
            Region::ExternalRam => 0xA000..=0xBFFF,
            Region::WorkRam => 0xC000..=0xDFFF,
            Region::Echo => 0xE000..=0xFDFF,
            Region::Oam => 0xFE00..=0xFE9F,
            Region::Unusable => 0xFEA0..=0xFEFF,
            Region::Io => 0xFF00..=0xFF7F,
            Region::HighRam => 0xFF80..=0xFFFE,
            Region::InterruptEnable => 0xFFFF..=0xFFFF,
        }
    }

    /// Offset of `addr` from the start of this region.
    #[inline]
    pub const fn offset(self, addr: u16) -> usize {
        addr.wrapping_sub(*self.range().start()) as usize
    }
}
