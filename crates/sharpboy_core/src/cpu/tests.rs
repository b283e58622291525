use std::ops::RangeInclusive;
use std::sync::{Mutex, Once};

use super::*;
use crate::error::{Access, Opcode};

/// Flat 64 KiB memory with an optional hole that faults on access.
struct TestBus {
    memory: Vec<u8>,
    unmapped: Option<RangeInclusive<u16>>,
    /// Every access in order, for read-modify-write checks.
    log: Vec<(Access, u16)>,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: vec![0; 0x10000],
            unmapped: None,
            log: Vec::new(),
        }
    }
}

impl TestBus {
    fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut bus = Self::default();
        bus.load(origin, program);
        bus
    }

    fn load(&mut self, origin: u16, bytes: &[u8]) {
        let start = origin as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }

    fn accesses_at(&self, addr: u16) -> Vec<Access> {
        self.log
            .iter()
            .filter(|(_, a)| *a == addr)
            .map(|(access, _)| *access)
            .collect()
    }

    fn check(&self, addr: u16, access: Access) -> Result<(), MemoryAccessFault> {
        match &self.unmapped {
            Some(range) if range.contains(&addr) => Err(MemoryAccessFault { addr, access }),
            _ => Ok(()),
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> Result<u8, MemoryAccessFault> {
        self.check(addr, Access::Read)?;
        self.log.push((Access::Read, addr));
        Ok(self.memory[addr as usize])
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<(), MemoryAccessFault> {
        self.check(addr, Access::Write)?;
        self.log.push((Access::Write, addr));
        self.memory[addr as usize] = value;
        Ok(())
    }
}

fn run(cpu: &mut Cpu, bus: &mut TestBus, steps: usize) -> Vec<u32> {
    (0..steps)
        .map(|_| cpu.step(bus).expect("step should succeed"))
        .collect()
}

#[test]
fn nop_advances_pc() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x00]);

    let cycles = cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn ld_immediates_and_add_register() {
    // LD A,5; LD B,3; ADD A,B
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x3E, 0x05, 0x06, 0x03, 0x80]);

    let cycles = run(&mut cpu, &mut bus, 3);

    assert_eq!(cycles, vec![8, 8, 4]);
    assert_eq!(cpu.regs.a, 8);
    assert_eq!(cpu.flags(), Flags::empty());
    assert_eq!(cpu.cycles(), 20);
    assert_eq!(cpu.regs.pc, 0x0005);
}

#[test]
fn inc_a_wraps_to_zero() {
    // LD A,0xFF; INC A
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x3E, 0xFF, 0x3C]);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.flags().zero());
    assert!(cpu.flags().half_carry());
    assert!(!cpu.flags().subtract());
    assert!(!cpu.flags().carry());
}

#[test]
fn inc_dec_write_back_to_the_named_register() {
    // INC C; DEC E; INC L; DEC A
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x0C, 0x1D, 0x2C, 0x3D]);
    cpu.regs.c = 0x0F;
    cpu.regs.e = 0x00;
    cpu.regs.l = 0x41;

    run(&mut cpu, &mut bus, 4);

    assert_eq!(cpu.regs.c, 0x10);
    assert_eq!(cpu.regs.e, 0xFF);
    assert_eq!(cpu.regs.l, 0x42);
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!((cpu.regs.b, cpu.regs.d, cpu.regs.h), (0, 0, 0));
    assert_eq!(cpu.flags(), Flags::SUBTRACT | Flags::HALF_CARRY);
}

#[test]
fn register_file_increment_and_pairs() {
    let mut regs = Registers::default();
    regs.f = Flags::CARRY;
    regs.h = 0xFF;

    regs.increment(Reg8::H);
    regs.decrement(Reg8::L);
    assert_eq!(regs.hl(), 0x00FF);
    assert_eq!(regs.f, Flags::CARRY);

    regs.set_pair(RegPair::DE, 0xBEEF);
    assert_eq!((regs.d, regs.e), (0xBE, 0xEF));
    regs.set_pair(RegPair::AF, 0x12FF);
    assert_eq!(regs.pair(RegPair::AF), 0x12F0);
}

#[test]
fn dec_register_sets_subtract_and_preserves_carry() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x05]); // DEC B
    cpu.regs.b = 0x10;
    cpu.regs.f = Flags::CARRY;

    assert_eq!(cpu.step(&mut bus), Ok(4));

    assert_eq!(cpu.regs.b, 0x0F);
    assert_eq!(cpu.flags(), Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY);
}

#[test]
fn push_bc_pop_de_transfers_pair() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xC5, 0xD1]); // PUSH BC; POP DE
    cpu.regs.sp = 0xFFFE;
    cpu.regs.set_bc(0x1234);

    let cycles = run(&mut cpu, &mut bus, 2);

    assert_eq!(cycles, vec![16, 12]);
    assert_eq!(cpu.regs.d, 0x12);
    assert_eq!(cpu.regs.e, 0x34);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(bus.memory[0xFFFD], 0x12);
    assert_eq!(bus.memory[0xFFFC], 0x34);
}

#[test]
fn pop_af_masks_low_flag_bits() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xC5, 0xF1]); // PUSH BC; POP AF
    cpu.regs.sp = 0xD000;
    cpu.regs.set_bc(0x12FF);

    run(&mut cpu, &mut bus, 2);

    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f.to_byte(), 0xF0);
    assert_eq!(cpu.regs.af(), 0x12F0);
}

#[test]
fn cb_rlc_b_and_flags() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xCB, 0x00]);
    cpu.regs.b = 0x85;

    assert_eq!(cpu.step(&mut bus), Ok(8));

    assert_eq!(cpu.regs.b, 0x0B);
    assert!(cpu.flags().carry());
    assert!(!cpu.flags().zero());
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn undefined_opcode_faults_and_freezes_state() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xD3, 0x00]);

    let expected = Fault::InvalidOpcode {
        opcode: Opcode::Primary(0xD3),
        addr: 0x0000,
    };
    assert_eq!(cpu.step(&mut bus), Err(expected.clone()));
    assert_eq!(cpu.state(), &CpuState::Faulted(expected.clone()));
    assert_eq!(cpu.fault(), Some(&expected));

    let regs = cpu.regs;
    let cycles = cpu.cycles();
    let accesses = bus.log.len();

    assert_eq!(cpu.step(&mut bus), Err(expected));
    assert_eq!(cpu.regs, regs);
    assert_eq!(cpu.cycles(), cycles);
    assert_eq!(bus.log.len(), accesses);
}

#[test]
fn every_undefined_primary_opcode_faults() {
    for opcode in [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD] {
        let mut cpu = Cpu::new();
        let mut bus = TestBus::with_program(0x0200, &[opcode]);
        cpu.regs.pc = 0x0200;

        let fault = cpu.step(&mut bus).unwrap_err();

        assert_eq!(
            fault,
            Fault::InvalidOpcode {
                opcode: Opcode::Primary(opcode),
                addr: 0x0200
            }
        );
        assert_eq!(fault.kind(), "InvalidOpcode");
        assert!(!cpu.is_running());
    }
}

#[test]
fn stop_is_reported_as_unimplemented() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x10, 0x00]);

    let fault = cpu.step(&mut bus).unwrap_err();

    assert_eq!(
        fault,
        Fault::UnimplementedOpcode {
            opcode: Opcode::Primary(0x10),
            addr: 0x0000
        }
    );
    assert_eq!(cpu.regs.pc, 0x0002);
    assert!(matches!(cpu.state(), CpuState::Faulted(_)));
}

#[test]
fn unmapped_access_faults_with_address() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x7E]); // LD A,(HL)
    bus.unmapped = Some(0xFEA0..=0xFEFF);
    cpu.regs.set_hl(0xFEA0);

    let fault = cpu.step(&mut bus).unwrap_err();

    assert_eq!(
        fault,
        Fault::MemoryAccess(MemoryAccessFault {
            addr: 0xFEA0,
            access: Access::Read
        })
    );
    assert_eq!(fault.kind(), "MemoryAccessFault");
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.fault(), Some(&fault));
}

#[test]
fn add_register_matches_reference_for_all_inputs() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x80]); // ADD A,B

    for a in 0..=255u8 {
        for b in 0..=255u8 {
            cpu.regs.pc = 0x0000;
            cpu.regs.a = a;
            cpu.regs.b = b;
            cpu.step(&mut bus).unwrap();

            let sum = a as u16 + b as u16;
            assert_eq!(cpu.regs.a, sum as u8);
            assert_eq!(cpu.flags().zero(), sum as u8 == 0);
            assert_eq!(cpu.flags().half_carry(), (a & 0x0F) + (b & 0x0F) > 0x0F);
            assert_eq!(cpu.flags().carry(), sum > 0xFF);
            assert!(!cpu.flags().subtract());
        }
        bus.log.clear();
    }
}

#[test]
fn daa_corrects_bcd_addition() {
    fn bcd(n: u8) -> u8 {
        ((n / 10) << 4) | (n % 10)
    }

    let mut cpu = Cpu::new();
    // ADD A,d8; DAA
    let mut bus = TestBus::with_program(0x0000, &[0xC6, 0x00, 0x27]);
    for a in 0..100u8 {
        for b in 0..100u8 {
            bus.memory[0x0001] = bcd(b);
            cpu.regs.pc = 0x0000;
            cpu.regs.a = bcd(a);

            run(&mut cpu, &mut bus, 2);

            assert_eq!(cpu.regs.a, bcd((a + b) % 100), "{a} + {b}");
            assert_eq!(cpu.flags().carry(), a + b >= 100, "{a} + {b}");
            assert!(!cpu.flags().half_carry());
        }
        bus.log.clear();
    }
}

#[test]
fn daa_corrects_bcd_subtraction() {
    // LD A,0x42; SUB 0x13; DAA
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x3E, 0x42, 0xD6, 0x13, 0x27]);

    run(&mut cpu, &mut bus, 3);

    assert_eq!(cpu.regs.a, 0x29);
    assert!(cpu.flags().subtract());
    assert!(!cpu.flags().carry());
}

#[test]
fn daa_cpl_scf_ccf_behaviour() {
    // ADD A,0x15; DAA; CPL; SCF; CCF
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xC6, 0x15, 0x27, 0x2F, 0x37, 0x3F]);
    cpu.regs.a = 0x27;

    assert_eq!(cpu.step(&mut bus), Ok(8));
    assert_eq!(cpu.regs.a, 0x3C);

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.regs.a, 0x42);
    assert!(!cpu.flags().carry());

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.regs.a, !0x42);
    assert!(cpu.flags().half_carry());
    assert!(cpu.flags().subtract());

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert!(cpu.flags().carry());
    assert!(!cpu.flags().half_carry());
    assert!(!cpu.flags().subtract());

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert!(!cpu.flags().carry());
}

#[test]
fn sub_and_sbc_update_flags() {
    let mut cpu = Cpu::new();
    // SUB 0x3E; SUB 0x01; SBC A,0x00
    let mut bus = TestBus::with_program(0x0000, &[0xD6, 0x3E, 0xD6, 0x01, 0xDE, 0x00]);

    cpu.regs.a = 0x3E;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.flags(), Flags::ZERO | Flags::SUBTRACT);

    cpu.regs.a = 0x10;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.flags(), Flags::SUBTRACT | Flags::HALF_CARRY);

    cpu.regs.a = 0x00;
    cpu.regs.f = Flags::CARRY;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(
        cpu.flags(),
        Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY
    );
}

#[test]
fn adc_includes_incoming_carry_in_half_carry() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xCE, 0x00]); // ADC A,0x00
    cpu.regs.a = 0x0F;
    cpu.regs.f = Flags::CARRY;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x10);
    assert_eq!(cpu.flags(), Flags::HALF_CARRY);
}

#[test]
fn logical_ops_and_cp_flags() {
    let mut cpu = Cpu::new();
    // AND 0x0F; OR 0x00; XOR A; CP 0x43
    let mut bus = TestBus::with_program(0x0000, &[0xE6, 0x0F, 0xF6, 0x00, 0xAF, 0xFE, 0x43]);

    cpu.regs.a = 0xF0;
    cpu.regs.f = Flags::CARRY;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.flags(), Flags::ZERO | Flags::HALF_CARRY);

    cpu.regs.f = Flags::all();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.flags(), Flags::ZERO);

    cpu.regs.a = 0x5A;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.flags(), Flags::ZERO);

    cpu.regs.a = 0x42;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(
        cpu.flags(),
        Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY
    );
}

#[test]
fn add_hl_carries_out_of_bits_11_and_15() {
    let mut cpu = Cpu::new();
    // ADD HL,BC; ADD HL,DE
    let mut bus = TestBus::with_program(0x0000, &[0x09, 0x19]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.f = Flags::ZERO | Flags::SUBTRACT;

    assert_eq!(cpu.step(&mut bus), Ok(8));
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert_eq!(cpu.flags(), Flags::ZERO | Flags::HALF_CARRY);

    cpu.regs.set_hl(0xFFFF);
    cpu.regs.set_de(0x0001);
    cpu.regs.f = Flags::empty();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.hl(), 0x0000);
    // Z is not touched by 16-bit adds.
    assert_eq!(cpu.flags(), Flags::HALF_CARRY | Flags::CARRY);
}

#[test]
fn add_sp_r8_signed_and_flags() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xE8, 0x08]);
    cpu.regs.sp = 0xFFF8;
    cpu.regs.f = Flags::ZERO | Flags::SUBTRACT;

    assert_eq!(cpu.step(&mut bus), Ok(16));

    assert_eq!(cpu.regs.sp, 0x0000);
    assert_eq!(cpu.flags(), Flags::HALF_CARRY | Flags::CARRY);
}

#[test]
fn ld_hl_sp_plus_r8_and_ld_sp_hl() {
    let mut cpu = Cpu::new();
    // LD HL,SP-2; LD SP,HL
    let mut bus = TestBus::with_program(0x0000, &[0xF8, 0xFE, 0xF9]);
    cpu.regs.sp = 0x0005;

    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(cpu.regs.hl(), 0x0003);
    assert_eq!(cpu.regs.sp, 0x0005);
    assert_eq!(cpu.flags(), Flags::HALF_CARRY | Flags::CARRY);

    assert_eq!(cpu.step(&mut bus), Ok(8));
    assert_eq!(cpu.regs.sp, 0x0003);
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    let mut cpu = Cpu::new();
    // RLCA; RLA; RLC A
    let mut bus = TestBus::with_program(0x0000, &[0x07, 0x17, 0xCB, 0x07]);

    cpu.regs.a = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert!(!cpu.flags().zero());

    cpu.regs.a = 0x80;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.flags(), Flags::CARRY);

    cpu.regs.a = 0x00;
    cpu.regs.f = Flags::empty();
    assert_eq!(cpu.step(&mut bus), Ok(8));
    assert_eq!(cpu.flags(), Flags::ZERO);
}

#[test]
fn rrca_and_rra_move_bit_zero_into_carry() {
    let mut cpu = Cpu::new();
    // RRCA; RRA
    let mut bus = TestBus::with_program(0x0000, &[0x0F, 0x1F]);

    cpu.regs.a = 0x01;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x80);
    assert_eq!(cpu.flags(), Flags::CARRY);

    cpu.regs.a = 0x02;
    cpu.step(&mut bus).unwrap();
    // Old carry enters bit 7.
    assert_eq!(cpu.regs.a, 0x81);
    assert_eq!(cpu.flags(), Flags::empty());
}

#[test]
fn cb_shifts_and_swap() {
    let mut cpu = Cpu::new();
    // SWAP A; SRA B; SRL B; RR C
    let mut bus = TestBus::with_program(0x0000, &[0xCB, 0x37, 0xCB, 0x28, 0xCB, 0x38, 0xCB, 0x19]);

    cpu.regs.a = 0xF0;
    cpu.regs.f = Flags::CARRY;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.flags(), Flags::empty());

    cpu.regs.b = 0x81;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0xC0);
    assert_eq!(cpu.flags(), Flags::CARRY);

    cpu.regs.b = 0x01;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x00);
    assert_eq!(cpu.flags(), Flags::ZERO | Flags::CARRY);

    cpu.regs.c = 0x01;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.c, 0x80);
    assert_eq!(cpu.flags(), Flags::CARRY);
}

#[test]
fn cb_bit_res_set_on_hl() {
    let mut cpu = Cpu::new();
    // BIT 0,(HL); SET 0,(HL); BIT 0,(HL); RES 0,(HL)
    let mut bus = TestBus::with_program(0x0000, &[0xCB, 0x46, 0xCB, 0xC6, 0xCB, 0x46, 0xCB, 0x86]);
    cpu.regs.set_hl(0xC000);
    cpu.regs.f = Flags::CARRY;

    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(cpu.flags(), Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);

    assert_eq!(cpu.step(&mut bus), Ok(16));
    assert_eq!(bus.memory[0xC000], 0x01);
    assert_eq!(cpu.flags(), Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.flags(), Flags::HALF_CARRY | Flags::CARRY);

    assert_eq!(cpu.step(&mut bus), Ok(16));
    assert_eq!(bus.memory[0xC000], 0x00);
}

#[test]
fn cb_shift_on_hl_reads_and_writes_once() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xCB, 0x06]); // RLC (HL)
    bus.memory[0xC100] = 0x80;
    cpu.regs.set_hl(0xC100);

    assert_eq!(cpu.step(&mut bus), Ok(16));

    assert_eq!(bus.memory[0xC100], 0x01);
    assert!(cpu.flags().carry());
    assert_eq!(bus.accesses_at(0xC100), vec![Access::Read, Access::Write]);
}

#[test]
fn inc_dec_on_hl_memory() {
    let mut cpu = Cpu::new();
    // INC (HL); DEC (HL)
    let mut bus = TestBus::with_program(0x0000, &[0x34, 0x35]);
    bus.memory[0xC000] = 0x0F;
    cpu.regs.set_hl(0xC000);
    cpu.regs.f = Flags::CARRY;

    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(bus.memory[0xC000], 0x10);
    assert_eq!(cpu.flags(), Flags::HALF_CARRY | Flags::CARRY);
    assert_eq!(bus.accesses_at(0xC000), vec![Access::Read, Access::Write]);

    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(bus.memory[0xC000], 0x0F);
    assert_eq!(
        cpu.flags(),
        Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY
    );
    assert_eq!(bus.accesses_at(0xC000).len(), 4);
}

#[test]
fn inc_dec_16bit_leave_flags_alone() {
    let mut cpu = Cpu::new();
    // INC BC; DEC SP
    let mut bus = TestBus::with_program(0x0000, &[0x03, 0x3B]);
    cpu.regs.set_bc(0xFFFF);
    cpu.regs.sp = 0x0000;
    cpu.regs.f = Flags::SUBTRACT;

    assert_eq!(run(&mut cpu, &mut bus, 2), vec![8, 8]);

    assert_eq!(cpu.regs.bc(), 0x0000);
    assert_eq!(cpu.regs.sp, 0xFFFF);
    assert_eq!(cpu.flags(), Flags::SUBTRACT);
}

#[test]
fn ld_hl_inc_dec_forms() {
    let mut cpu = Cpu::new();
    // LD (HL+),A; LD A,(HL-)
    let mut bus = TestBus::with_program(0x0000, &[0x22, 0x3A]);
    cpu.regs.a = 0x55;
    cpu.regs.set_hl(0xC000);

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.memory[0xC000], 0x55);
    assert_eq!(cpu.regs.hl(), 0xC001);

    bus.memory[0xC001] = 0x66;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x66);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn high_page_loads() {
    let mut cpu = Cpu::new();
    // LDH (0x80),A; LD (C),A; LDH A,(0x82)
    let mut bus = TestBus::with_program(0x0000, &[0xE0, 0x80, 0xE2, 0xF0, 0x82]);
    bus.memory[0xFF82] = 0x99;
    cpu.regs.a = 0x42;
    cpu.regs.c = 0x81;

    assert_eq!(run(&mut cpu, &mut bus, 3), vec![12, 8, 12]);

    assert_eq!(bus.memory[0xFF80], 0x42);
    assert_eq!(bus.memory[0xFF81], 0x42);
    assert_eq!(cpu.regs.a, 0x99);
}

#[test]
fn ld_a16_sp_and_ld_a16_a() {
    let mut cpu = Cpu::new();
    // LD (0xC010),SP; LD (0xC020),A; LD A,(0xC010)
    let mut bus = TestBus::with_program(
        0x0000,
        &[0x08, 0x10, 0xC0, 0xEA, 0x20, 0xC0, 0xFA, 0x10, 0xC0],
    );
    cpu.regs.sp = 0xBEEF;
    cpu.regs.a = 0x7A;

    assert_eq!(run(&mut cpu, &mut bus, 3), vec![20, 16, 16]);

    assert_eq!(bus.memory[0xC010], 0xEF);
    assert_eq!(bus.memory[0xC011], 0xBE);
    assert_eq!(bus.memory[0xC020], 0x7A);
    assert_eq!(cpu.regs.a, 0xEF);
}

#[test]
fn jr_relative_forward_and_backward() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    bus.load(0x0010, &[0x18, 0x04]); // JR +4
    bus.load(0x0016, &[0x18, 0xF8]); // JR -8
    cpu.regs.pc = 0x0010;

    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(cpu.regs.pc, 0x0016);

    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(cpu.regs.pc, 0x0010);
}

#[test]
fn conditional_branches_cost_less_when_not_taken() {
    // JR NZ,+2
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x20, 0x02]);
    cpu.regs.f = Flags::ZERO;
    assert_eq!(cpu.step(&mut bus), Ok(8));
    assert_eq!(cpu.regs.pc, 0x0002);

    cpu.regs.pc = 0x0000;
    cpu.regs.f = Flags::empty();
    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(cpu.regs.pc, 0x0004);

    // JP Z,0x1234
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xCA, 0x34, 0x12]);
    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(cpu.regs.pc, 0x0003);

    cpu.regs.pc = 0x0000;
    cpu.regs.f = Flags::ZERO;
    assert_eq!(cpu.step(&mut bus), Ok(16));
    assert_eq!(cpu.regs.pc, 0x1234);

    // CALL NC,0x1234
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xD4, 0x34, 0x12]);
    cpu.regs.sp = 0xD000;
    cpu.regs.f = Flags::CARRY;
    assert_eq!(cpu.step(&mut bus), Ok(12));
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xD000);

    cpu.regs.pc = 0x0000;
    cpu.regs.f = Flags::empty();
    assert_eq!(cpu.step(&mut bus), Ok(24));
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.regs.sp, 0xCFFE);

    // RET C
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xD8]);
    bus.load(0xCFFE, &[0x78, 0x56]);
    cpu.regs.sp = 0xCFFE;
    assert_eq!(cpu.step(&mut bus), Ok(8));
    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cpu.regs.sp, 0xCFFE);

    cpu.regs.pc = 0x0000;
    cpu.regs.f = Flags::CARRY;
    assert_eq!(cpu.step(&mut bus), Ok(20));
    assert_eq!(cpu.regs.pc, 0x5678);
    assert_eq!(cpu.regs.sp, 0xD000);
}

#[test]
fn call_and_ret_roundtrip() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    bus.load(0x0100, &[0xCD, 0x00, 0x02]); // CALL 0x0200
    bus.load(0x0200, &[0xC9]); // RET
    cpu.regs.pc = 0x0100;
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus), Ok(24));
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x01);
    assert_eq!(bus.memory[0xFFFC], 0x03);

    assert_eq!(cpu.step(&mut bus), Ok(16));
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn jp_hl_sets_pc() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0xE9]);
    cpu.regs.set_hl(0x4321);

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert_eq!(cpu.regs.pc, 0x4321);
}

#[test]
fn rst_and_reti_behaviour() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    bus.load(0x0150, &[0xEF]); // RST 28H
    bus.load(0x0028, &[0xD9]); // RETI
    cpu.regs.pc = 0x0150;
    cpu.regs.sp = 0xD000;

    assert_eq!(cpu.step(&mut bus), Ok(16));
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(cpu.regs.sp, 0xCFFE);

    assert!(!cpu.gate.is_enabled());
    assert_eq!(cpu.step(&mut bus), Ok(16));
    assert_eq!(cpu.regs.pc, 0x0151);
    assert!(cpu.gate.is_enabled());
}

#[test]
fn ei_sets_ime_after_next_instruction() {
    let mut cpu = Cpu::new();
    // EI; NOP
    let mut bus = TestBus::with_program(0x0000, &[0xFB, 0x00]);

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.gate.is_enabled());
    assert!(cpu.gate.is_enable_scheduled());

    cpu.step(&mut bus).unwrap();
    assert!(cpu.gate.is_enabled());
}

#[test]
fn di_clears_ime_and_cancels_pending_ei() {
    let mut cpu = Cpu::new();
    // EI; DI; NOP
    let mut bus = TestBus::with_program(0x0000, &[0xFB, 0xF3, 0x00]);

    run(&mut cpu, &mut bus, 3);
    assert!(!cpu.gate.is_enabled());
    assert!(!cpu.gate.is_enable_scheduled());

    let mut bus = TestBus::with_program(0x0000, &[0xF3]);
    cpu.regs.pc = 0x0000;
    cpu.gate.enable();
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.gate.is_enabled());
}

#[test]
fn pending_interrupt_waits_for_ei_delay() {
    let mut cpu = Cpu::new();
    // EI; NOP; NOP
    let mut bus = TestBus::with_program(0x0000, &[0xFB, 0x00, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;
    cpu.regs.sp = 0xD000;

    assert_eq!(run(&mut cpu, &mut bus, 2), vec![4, 4]);
    assert_eq!(cpu.regs.pc, 0x0002);

    assert_eq!(cpu.step(&mut bus), Ok(20));
    assert_eq!(cpu.regs.pc, Interrupt::VBlank.vector());
    assert_eq!(bus.memory[IF_ADDR as usize], 0x00);
    assert_eq!(bus.memory[0xCFFF], 0x00);
    assert_eq!(bus.memory[0xCFFE], 0x02);
    assert!(!cpu.gate.is_enabled());
}

#[test]
fn interrupt_priority_follows_bit_order() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x00]);
    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = 0x14;
    cpu.regs.sp = 0xD000;
    cpu.gate.enable();

    assert_eq!(cpu.step(&mut bus), Ok(20));
    assert_eq!(cpu.regs.pc, 0x0050);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x10);
}

#[test]
fn halt_idles_until_interrupt_pending() {
    let mut cpu = Cpu::new();
    // HALT; NOP
    let mut bus = TestBus::with_program(0x0000, &[0x76, 0x00]);

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0001);

    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0001);

    // IME off: the request wakes the CPU but is left pending.
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(cpu.step(&mut bus), Ok(4));
    assert!(cpu.is_running());
    assert_eq!(cpu.regs.pc, 0x0002);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x01);
}

#[test]
fn halt_with_ime_services_interrupt() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x0000, &[0x76]);
    cpu.regs.sp = 0xD000;
    cpu.gate.enable();

    cpu.step(&mut bus).unwrap();
    assert!(cpu.is_halted());

    bus.memory[IE_ADDR as usize] = 0x04;
    bus.memory[IF_ADDR as usize] = 0x04;
    assert_eq!(cpu.step(&mut bus), Ok(20));

    assert!(cpu.is_running());
    assert_eq!(cpu.regs.pc, Interrupt::Timer.vector());
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x01);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x00);
    assert_eq!(cpu.cycles(), 24);
}

#[test]
fn post_boot_and_reset() {
    let mut cpu = Cpu::post_boot();

    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);

    let mut bus = TestBus::with_program(0x0100, &[0xDD]);
    assert!(cpu.step(&mut bus).is_err());

    cpu.reset();
    assert!(cpu.is_running());
    assert_eq!(cpu.regs, Registers::default());
    assert_eq!(cpu.cycles(), 0);
    assert!(!cpu.gate.is_enabled());
}

#[test]
fn opcode_tables_are_consistent() {
    let invalid = PRIMARY.iter().filter(|instr| instr.op == Op::Invalid).count();
    assert_eq!(invalid, 11);

    for (opcode, instr) in PRIMARY.iter().enumerate() {
        if instr.is_conditional() {
            assert!(
                instr.cost(true) > instr.cost(false),
                "0x{opcode:02X} {}",
                instr.op
            );
        }
        if !matches!(instr.op, Op::Invalid | Op::PrefixCb) {
            assert!(instr.cycles > 0, "0x{opcode:02X} has no cost");
        }
    }

    assert!(EXTENDED.iter().all(|instr| !instr.is_conditional()));
}

#[test]
fn mnemonics() {
    assert_eq!(PRIMARY[0x3E].op.to_string(), "LD A,d8");
    assert_eq!(PRIMARY[0x80].op.to_string(), "ADD A,B");
    assert_eq!(PRIMARY[0x22].op.to_string(), "LD (HL+),A");
    assert_eq!(PRIMARY[0x07].op.to_string(), "RLCA");
    assert_eq!(PRIMARY[0xEF].op.to_string(), "RST 28H");
    assert_eq!(PRIMARY[0xC4].op.to_string(), "CALL NZ,a16");
    assert_eq!(EXTENDED[0x00].op.to_string(), "RLC B");
    assert_eq!(EXTENDED[0x7E].op.to_string(), "BIT 7,(HL)");
}

/// Collects trace-level messages from every test in this binary.
struct TraceCapture;

static TRACES: Mutex<Vec<String>> = Mutex::new(Vec::new());
static TRACE_CAPTURE: TraceCapture = TraceCapture;

impl log::Log for TraceCapture {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Trace
    }

    fn log(&self, record: &log::Record) {
        if record.level() == log::Level::Trace {
            TRACES.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn capture_traces() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&TRACE_CAPTURE).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

#[test]
fn trace_names_extended_instructions() {
    capture_traces();

    // NOP; RLC B; BIT 7,(HL)
    let mut cpu = Cpu::new();
    let mut bus = TestBus::with_program(0x4320, &[0x00, 0xCB, 0x00, 0xCB, 0x7E]);
    cpu.regs.pc = 0x4320;
    run(&mut cpu, &mut bus, 3);

    let traces: Vec<String> = TRACES
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.starts_with("432"))
        .cloned()
        .collect();
    assert_eq!(traces, ["4320: NOP", "4321: RLC B", "4323: BIT 7,(HL)"]);
}
