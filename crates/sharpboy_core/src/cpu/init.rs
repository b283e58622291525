use super::{Cpu, CpuState, Flags, InterruptGate, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A CPU with every register zero, IME off and the cycle counter at 0.
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            gate: InterruptGate::default(),
            state: CpuState::Running,
            cycles: 0,
            instr_addr: 0,
        }
    }

    /// A CPU in the state the DMG boot ROM leaves behind when it hands
    /// control to cartridge code at 0x0100.
    pub fn post_boot() -> Self {
        let mut cpu = Self::new();
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// Back to the all-zero power-on state. This is the only way out of
    /// `Faulted`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code (values as documented in Pan Docs).
    pub fn apply_dmg_boot_state(&mut self) {
        self.regs.a = 0x01;
        self.regs.f = Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY;
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }
}
