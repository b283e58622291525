//! Video collaborator storage: VRAM, OAM and the LCD registers.
//!
//! Nothing here renders. The bus routes 0x8000-0x9FFF, 0xFE00-0xFE9F and
//! 0xFF40-0xFF4B to this type so a display pipeline can read a consistent
//! snapshot between CPU steps.

use bitflags::bitflags;

pub const VRAM_SIZE: usize = 0x2000;
pub const OAM_SIZE: usize = 0xA0;

/// First and last LCD register addresses.
pub const LCD_REGS_START: u16 = 0xFF40;
pub const LCD_REGS_END: u16 = 0xFF4B;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Lcdc: u8 {
        const DISPLAY_ENABLE = 0x80;
        const WINDOW_TILE_MAP = 0x40;
        const WINDOW_ENABLE = 0x20;
        const TILE_DATA = 0x10;
        const BG_TILE_MAP = 0x08;
        const LARGE_SPRITES = 0x04;
        const SPRITES_ENABLE = 0x02;
        const BG_ENABLE = 0x01;
    }
}

/// DMG grey level, 0 = lightest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shade {
    White,
    LightGray,
    DarkGray,
    Black,
}

impl Shade {
    /// Shade assigned to colour number `color` (0..=3) by a palette register.
    pub fn from_palette(palette: u8, color: u8) -> Shade {
        match (palette >> ((color & 0x03) * 2)) & 0x03 {
            0 => Shade::White,
            1 => Shade::LightGray,
            2 => Shade::DarkGray,
            _ => Shade::Black,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Video {
    vram: Box<[u8; VRAM_SIZE]>,
    oam: [u8; OAM_SIZE],
    pub lcdc: Lcdc,
    pub stat: u8,
    pub scy: u8,
    pub scx: u8,
    pub ly: u8,
    pub lyc: u8,
    /// OAM DMA source page. Stored only; no transfer is performed.
    pub dma: u8,
    pub bgp: u8,
    pub obp0: u8,
    pub obp1: u8,
    pub wy: u8,
    pub wx: u8,
}

impl Default for Video {
    fn default() -> Self {
        Self {
            vram: Box::new([0; VRAM_SIZE]),
            oam: [0; OAM_SIZE],
            lcdc: Lcdc::empty(),
            stat: 0,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            dma: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
        }
    }
}

impl Video {
    #[inline]
    pub fn read_vram(&self, addr: u16) -> u8 {
        self.vram[(addr as usize).wrapping_sub(0x8000) % VRAM_SIZE]
    }

    #[inline]
    pub fn write_vram(&mut self, addr: u16, value: u8) {
        self.vram[(addr as usize).wrapping_sub(0x8000) % VRAM_SIZE] = value;
    }

    #[inline]
    pub fn read_oam(&self, addr: u16) -> u8 {
        self.oam[(addr as usize).wrapping_sub(0xFE00) % OAM_SIZE]
    }

    #[inline]
    pub fn write_oam(&mut self, addr: u16, value: u8) {
        self.oam[(addr as usize).wrapping_sub(0xFE00) % OAM_SIZE] = value;
    }

    pub fn vram(&self) -> &[u8] {
        &self.vram[..]
    }

    pub fn oam(&self) -> &[u8] {
        &self.oam
    }

    /// Read one of 0xFF40..=0xFF4B.
    pub fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => self.stat,
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF46 => self.dma,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    /// Write one of 0xFF40..=0xFF4B.
    pub fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF40 => self.lcdc = Lcdc::from_bits_retain(value),
            0xFF41 => self.stat = value,
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            0xFF44 => self.ly = value,
            0xFF45 => self.lyc = value,
            0xFF46 => self.dma = value,
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }

    #[inline]
    pub fn display_enabled(&self) -> bool {
        self.lcdc.contains(Lcdc::DISPLAY_ENABLE)
    }

    pub fn window_tile_map_base(&self) -> u16 {
        if self.lcdc.contains(Lcdc::WINDOW_TILE_MAP) {
            0x9C00
        } else {
            0x9800
        }
    }

    pub fn bg_tile_map_base(&self) -> u16 {
        if self.lcdc.contains(Lcdc::BG_TILE_MAP) {
            0x9C00
        } else {
            0x9800
        }
    }

    /// Base of tile data: 0x8000 (unsigned indices) or 0x8800 (signed).
    pub fn tile_data_base(&self) -> u16 {
        if self.lcdc.contains(Lcdc::TILE_DATA) {
            0x8000
        } else {
            0x8800
        }
    }

    /// Sprite height in pixels: 8 or 16.
    pub fn sprite_height(&self) -> u8 {
        if self.lcdc.contains(Lcdc::LARGE_SPRITES) {
            16
        } else {
            8
        }
    }

    #[inline]
    pub fn bg_shade(&self, color: u8) -> Shade {
        Shade::from_palette(self.bgp, color)
    }

    /// Shade of an object pixel through OBP0 (`palette == 0`) or OBP1.
    #[inline]
    pub fn obj_shade(&self, palette: u8, color: u8) -> Shade {
        let reg = if palette == 0 { self.obp0 } else { self.obp1 };
        Shade::from_palette(reg, color)
    }
}
