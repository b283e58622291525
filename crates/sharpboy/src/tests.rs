use std::io::Write;

use sharpboy_core::{CartridgeLoadError, Fault, Opcode, ROM_BANK_SIZE};
use tempfile::NamedTempFile;

use super::*;

/// Write a 32 KiB ROM with `program` at `origin` to a temporary file.
fn rom_file(origin: usize, program: &[u8]) -> NamedTempFile {
    let mut rom = vec![0u8; 2 * ROM_BANK_SIZE];
    rom[0x134..0x13E].copy_from_slice(b"RUNNERTST\0");
    rom[origin..origin + program.len()].copy_from_slice(program);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&rom).unwrap();
    file.flush().unwrap();
    file
}

fn config(file: &NamedTempFile, budget: Option<u64>) -> RunConfig {
    RunConfig::builder()
        .rom_path(file.path())
        .cycle_budget(budget)
        .build()
}

#[test]
fn builder_defaults() {
    let config = RunConfig::builder().rom_path("game.gb").build();
    assert_eq!(config.rom_path, PathBuf::from("game.gb"));
    assert_eq!(config.cycle_budget, None);
    assert!(config.post_boot);
}

#[test]
fn stops_when_budget_is_spent() {
    // JR -2
    let file = rom_file(0x100, &[0x18, 0xFE]);
    let summary = run(&config(&file, Some(1000))).unwrap();

    assert_eq!(summary.outcome, RunOutcome::BudgetExhausted);
    assert!(summary.cycles >= 1000);
    assert!(summary.cycles < 1000 + 12);
    assert_eq!(summary.cycles, summary.instructions * 12);
}

#[test]
fn stops_on_halt_with_interrupts_disabled() {
    // DI; NOP; HALT
    let file = rom_file(0x100, &[0xF3, 0x00, 0x76]);
    let summary = run(&config(&file, None)).unwrap();

    assert_eq!(
        summary,
        RunSummary {
            cycles: 12,
            instructions: 3,
            outcome: RunOutcome::Deadlocked,
        }
    );
}

#[test]
fn fault_surfaces_as_downcastable_error() {
    // NOP; <invalid>
    let file = rom_file(0x100, &[0x00, 0xED]);
    let err = run(&config(&file, None)).unwrap_err();

    let fault = err.downcast_ref::<Fault>().unwrap();
    assert_eq!(
        fault,
        &Fault::InvalidOpcode {
            opcode: Opcode::Primary(0xED),
            addr: 0x0101,
        }
    );
    assert!(format!("{err:#}").contains("after 1 instructions"));
}

#[test]
fn missing_rom_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::builder()
        .rom_path(dir.path().join("missing.gb"))
        .build();

    let err = run(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CartridgeLoadError>(),
        Some(CartridgeLoadError::Io { .. })
    ));
    assert!(err.downcast_ref::<Fault>().is_none());
}

#[test]
fn zeroed_start_runs_from_address_zero() {
    // HALT at the reset vector; IE is zero on a fresh machine.
    let file = rom_file(0x0000, &[0x76]);
    let config = RunConfig::builder()
        .rom_path(file.path())
        .post_boot(false)
        .build();

    let summary = run(&config).unwrap();
    assert_eq!(summary.outcome, RunOutcome::Deadlocked);
    assert_eq!(summary.instructions, 1);
    assert_eq!(summary.cycles, 4);
}

#[test]
fn summary_display_names_the_outcome() {
    let summary = RunSummary {
        cycles: 40,
        instructions: 10,
        outcome: RunOutcome::Deadlocked,
    };
    assert_eq!(
        summary.to_string(),
        "halted with no interrupt enabled after 10 instructions (40 cycles)"
    );
}
