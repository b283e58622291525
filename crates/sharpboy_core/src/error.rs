use std::fmt;
use std::path::PathBuf;

/// Opcode byte(s) as fetched from the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Primary(u8),
    /// Second byte of a `0xCB`-prefixed instruction.
    Extended(u8),
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Primary(op) => write!(f, "0x{op:02X}"),
            Opcode::Extended(op) => write!(f, "0xCB 0x{op:02X}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

/// A bus access that no mapped region answers.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("unmapped {access} at 0x{addr:04X}")]
pub struct MemoryAccessFault {
    pub addr: u16,
    pub access: Access,
}

/// Reasons the interpreter stops executing.
///
/// Every variant carries the address of the instruction that failed so the
/// driving loop can report it. Once raised, the CPU stays in
/// [`CpuState::Faulted`](crate::CpuState::Faulted) until reset.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    #[error("invalid opcode {opcode} at 0x{addr:04X}")]
    InvalidOpcode { opcode: Opcode, addr: u16 },

    #[error("unimplemented opcode {opcode} at 0x{addr:04X}")]
    UnimplementedOpcode { opcode: Opcode, addr: u16 },

    #[error("memory access fault: {0}")]
    MemoryAccess(#[from] MemoryAccessFault),
}

impl Fault {
    /// Short name of the fault class, as reported at the process boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::InvalidOpcode { .. } => "InvalidOpcode",
            Fault::UnimplementedOpcode { .. } => "UnimplementedOpcode",
            Fault::MemoryAccess(_) => "MemoryAccessFault",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CartridgeLoadError {
    #[error("failed to read cartridge '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cartridge image is empty")]
    Empty,

    #[error("cartridge image is truncated: {len} bytes, expected at least {expected}")]
    Truncated { len: usize, expected: usize },
}
