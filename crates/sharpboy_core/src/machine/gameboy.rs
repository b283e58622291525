use crate::cpu::{Cpu, Interrupt};
use crate::error::Fault;

use super::{Cartridge, MemoryBus};

/// High-level Game Boy machine.
///
/// Holds the CPU core and the bus and is the single owner of both: every
/// step runs to completion before the next one starts.
#[derive(Clone, Debug)]
pub struct GameBoy {
    pub cpu: Cpu,
    pub bus: MemoryBus,
    post_boot: bool,
}

impl GameBoy {
    /// A machine with an all-zero CPU and zeroed I/O registers; execution
    /// starts at 0x0000.
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: MemoryBus::new(cartridge),
            post_boot: false,
        }
    }

    /// A machine in the state the DMG boot ROM leaves behind; execution
    /// starts at the cartridge entry point 0x0100.
    pub fn post_boot(cartridge: Cartridge) -> Self {
        let mut bus = MemoryBus::new(cartridge);
        bus.apply_dmg_initial_io_state();
        Self {
            cpu: Cpu::post_boot(),
            bus,
            post_boot: true,
        }
    }

    /// Execute one instruction. See [`Cpu::step`].
    #[inline]
    pub fn step(&mut self) -> Result<u32, Fault> {
        self.cpu.step(&mut self.bus)
    }

    /// Step until at least `cycles` T-cycles have been consumed and return
    /// how many were.
    ///
    /// The last instruction may overshoot the budget. A fault stops the run
    /// immediately.
    pub fn run_for(&mut self, cycles: u64) -> Result<u64, Fault> {
        let start = self.cpu.cycles();
        while self.cpu.cycles() - start < cycles {
            self.step()?;
        }
        Ok(self.cpu.cycles() - start)
    }

    /// Deliver an interrupt request, as a peripheral would.
    pub fn request_interrupt(&mut self, irq: Interrupt) {
        self.bus.request_interrupt(irq);
    }

    /// Halted with no interrupt source enabled in IE: nothing in the core
    /// can ever wake the CPU again.
    pub fn is_deadlocked(&self) -> bool {
        self.cpu.is_halted() && self.bus.interrupt_enable() & 0x1F == 0
    }

    /// Return to the initial state chosen at construction, keeping the ROM
    /// image and external RAM. This is the way out of a fault.
    pub fn reset(&mut self) {
        self.bus.reset();
        if self.post_boot {
            self.cpu = Cpu::post_boot();
            self.bus.apply_dmg_initial_io_state();
        } else {
            self.cpu.reset();
        }
    }

    #[inline]
    pub fn cartridge(&self) -> &Cartridge {
        self.bus.cartridge()
    }

    #[inline]
    pub fn cartridge_mut(&mut self) -> &mut Cartridge {
        self.bus.cartridge_mut()
    }
}
