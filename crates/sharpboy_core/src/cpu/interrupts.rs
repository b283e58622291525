mod service;

/// IF: pending interrupt requests.
pub const IF_ADDR: u16 = 0xFF0F;
/// IE: interrupt enable mask.
pub const IE_ADDR: u16 = 0xFFFF;

/// Maskable interrupt sources, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Bit position in IE/IF.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn mask(self) -> u8 {
        1 << self.index()
    }

    /// Service routine address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + self.index() as u16 * 8
    }

    /// Highest-priority interrupt present in a pending mask.
    pub fn highest(pending: u8) -> Option<Interrupt> {
        Self::ALL.into_iter().find(|irq| pending & irq.mask() != 0)
    }
}

/// Interrupt master enable (IME).
///
/// EI does not take effect immediately: the enable is armed after EI
/// completes and lands after the following instruction completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterruptGate {
    enabled: bool,
    enable_pending: bool,
    enable_delay: bool,
}

impl InterruptGate {
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable immediately (RETI).
    pub fn enable(&mut self) {
        self.enabled = true;
        self.enable_pending = false;
        self.enable_delay = false;
    }

    /// Disable immediately (DI, interrupt entry). Cancels a pending EI.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.enable_pending = false;
        self.enable_delay = false;
    }

    /// EI.
    pub fn schedule_enable(&mut self) {
        if !self.enabled {
            self.enable_pending = true;
        }
    }

    /// Whether an EI is in flight.
    #[inline]
    pub fn is_enable_scheduled(&self) -> bool {
        self.enable_pending || self.enable_delay
    }

    /// Apply delayed IME change requested by EI. Called once after every
    /// completed instruction.
    pub(crate) fn advance(&mut self) {
        if self.enable_delay {
            // Second instruction boundary after EI: actually enable IME.
            self.enabled = true;
            self.enable_delay = false;
        } else if self.enable_pending {
            // EI itself just completed: arm the delayed enable.
            self.enable_pending = false;
            self.enable_delay = true;
        }
    }
}
