//! Driving loop and process boundary for the SharpBoy core.
//!
//! The core executes one instruction per call; this crate decides how long
//! to keep calling, and turns the outcome into something a shell can use.

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use typed_builder::TypedBuilder;

pub use sharpboy_core;
use sharpboy_core::{Cartridge, GameBoy};

/// How to run a ROM.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    /// Stop after this many T-cycles. `None` runs until a fault or deadlock.
    #[builder(default)]
    pub cycle_budget: Option<u64>,
    /// Start from the DMG post-boot state at 0x0100 rather than from an
    /// all-zero CPU at 0x0000.
    #[builder(default = true)]
    pub post_boot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    BudgetExhausted,
    /// Halted with every interrupt source disabled.
    Deadlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    /// Instructions executed; idle HALT slots are not counted.
    pub instructions: u64,
    pub outcome: RunOutcome,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.outcome {
            RunOutcome::BudgetExhausted => "cycle budget exhausted",
            RunOutcome::Deadlocked => "halted with no interrupt enabled",
        };
        write!(
            f,
            "{reason} after {} instructions ({} cycles)",
            self.instructions, self.cycles
        )
    }
}

/// Load the cartridge named by `config` and build the machine.
pub fn load(config: &RunConfig) -> anyhow::Result<GameBoy> {
    let cartridge = Cartridge::from_file(&config.rom_path)
        .with_context(|| format!("failed to load ROM '{}'", config.rom_path.display()))?;

    Ok(if config.post_boot {
        GameBoy::post_boot(cartridge)
    } else {
        GameBoy::new(cartridge)
    })
}

/// Load and run a ROM until its budget is exhausted, it deadlocks or the
/// CPU faults. A fault is returned as the error, with [`sharpboy_core::Fault`]
/// reachable through `downcast_ref`.
pub fn run(config: &RunConfig) -> anyhow::Result<RunSummary> {
    let mut gb = load(config)?;
    run_machine(&mut gb, config.cycle_budget)
}

/// Step `gb` until `budget` T-cycles have been consumed or it deadlocks.
pub fn run_machine(gb: &mut GameBoy, budget: Option<u64>) -> anyhow::Result<RunSummary> {
    let start = gb.cpu.cycles();
    let mut instructions = 0u64;

    let outcome = loop {
        let consumed = gb.cpu.cycles() - start;
        if budget.is_some_and(|budget| consumed >= budget) {
            break RunOutcome::BudgetExhausted;
        }
        if gb.is_deadlocked() {
            break RunOutcome::Deadlocked;
        }

        let was_halted = gb.cpu.is_halted();
        gb.step().with_context(|| {
            format!(
                "CPU faulted after {instructions} instructions ({consumed} cycles)\n{}",
                gb.cpu.regs
            )
        })?;
        if !was_halted {
            instructions += 1;
        }
    };

    let summary = RunSummary {
        cycles: gb.cpu.cycles() - start,
        instructions,
        outcome,
    };
    log::info!("run finished: {summary}");
    Ok(summary)
}

#[cfg(test)]
mod tests;
