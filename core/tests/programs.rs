use vm8_core::{Fault, Machine, MachineConfig, StackFault, StepOutcome};

fn boot(program: &[u8]) -> Machine {
    let mut machine = Machine::with_config(MachineConfig {
        history: 16,
        seed: Some(0),
    });
    machine.load(program).unwrap();
    machine
}

fn run(machine: &mut Machine, steps: usize) {
    for _ in 0..steps {
        machine.step().unwrap();
    }
}

#[test]
fn test_add_immediate_program() {
    let mut machine = boot(&[
        0x60, 0x05, // LD V0, 0x05
        0x70, 0x05, // ADD V0, 0x05
    ]);
    run(&mut machine, 2);
    assert_eq!(machine.registers().v[0x0], 10);
    assert_eq!(machine.registers().pc, 0x204);
}

#[test]
fn test_clear_screen_blanks_every_pixel() {
    let mut machine = boot(&[
        0xA0, 0x00, // LD I, 0x000
        0xD0, 0x0F, // DRW V0, V0, 0xF
        0x00, 0xE0, // CLS
    ]);
    run(&mut machine, 2);
    assert!(machine.frame().iter().flatten().any(|p| *p == 1));
    run(&mut machine, 1);
    assert_eq!(machine.frame().iter().flatten().filter(|p| **p == 0).count(), 2048);
}

#[test]
fn test_subroutine_returns_after_call() {
    let mut machine = boot(&[
        0x22, 0x06, // 0x200: CALL 0x206
        0x61, 0x01, // 0x202: LD V1, 0x01
        0x12, 0x04, // 0x204: JP 0x204
        0x60, 0x07, // 0x206: LD V0, 0x07
        0x00, 0xEE, // 0x208: RET
    ]);
    run(&mut machine, 3);
    assert_eq!(machine.registers().pc, 0x202);
    assert_eq!(machine.state().stack.depth(), 0);
    run(&mut machine, 1);
    assert_eq!(machine.registers().v[0x0..0x2], [0x07, 0x01]);
}

#[test]
fn test_runaway_recursion_overflows() {
    // 0x200: CALL 0x200
    let mut machine = boot(&[0x22, 0x00]);
    run(&mut machine, 16);
    assert_eq!(machine.step(), Err(Fault::Stack(StackFault::Overflow)));
    assert_eq!(machine.state().stack.depth(), 16);
}

#[test]
fn test_bcd_of_register() {
    let mut machine = boot(&[
        0x60, 0x9C, // LD V0, 156
        0xA3, 0x00, // LD I, 0x300
        0xF0, 0x33, // LD B, V0
    ]);
    run(&mut machine, 3);
    assert_eq!(machine.state().memory.slice(0x300, 3).unwrap(), &[1, 5, 6]);
}

#[test]
fn test_draw_digit_glyph_then_erase() {
    let mut machine = boot(&[
        0x60, 0x0A, // LD V0, 0x0A
        0xF0, 0x29, // LD F, V0
        0x61, 0x08, // LD V1, 0x08
        0xD1, 0x15, // DRW V1, V1, 5
        0xD1, 0x15, // DRW V1, V1, 5
    ]);
    run(&mut machine, 4);
    assert_eq!(machine.registers().i, 50);
    assert_eq!(machine.registers().v[0xF], 0);
    // Top row of 'A' is 0xF0
    assert_eq!(machine.frame()[8][8..13], [1, 1, 1, 1, 0]);
    run(&mut machine, 1);
    assert_eq!(machine.registers().v[0xF], 1);
    assert!(machine.frame().iter().flatten().all(|p| *p == 0));
}

#[test]
fn test_countdown_with_delay_timer() {
    let mut machine = boot(&[
        0x60, 0x03, // 0x200: LD V0, 0x03
        0xF0, 0x15, // 0x202: LD DT, V0
        0xF1, 0x07, // 0x204: LD V1, DT
        0x31, 0x00, // 0x206: SE V1, 0x00
        0x12, 0x04, // 0x208: JP 0x204
        0x12, 0x0A, // 0x20A: JP 0x20A
    ]);
    run(&mut machine, 2);
    let mut steps = 0;
    while machine.registers().pc != 0x20A {
        machine.step().unwrap();
        steps += 1;
        if steps % 3 == 0 {
            machine.tick_timers();
        }
        assert!(steps < 100, "delay timer never ran out");
    }
    assert_eq!(machine.registers().delay_timer, 0);
}

#[test]
fn test_key_wait_is_cooperative() {
    let mut machine = boot(&[
        0xF5, 0x0A, // LD V5, K
        0xE5, 0x9E, // SKP V5
        0x60, 0x01, // LD V0, 0x01
        0x61, 0x01, // LD V1, 0x01
    ]);
    for _ in 0..5 {
        assert_eq!(machine.step(), Ok(StepOutcome::WaitingForKey));
    }
    machine.key_press(0x9);
    run(&mut machine, 3);
    assert_eq!(machine.registers().v[0x5], 0x9);
    // SKP skipped LD V0
    assert_eq!(machine.registers().v[0x0..0x2], [0x00, 0x01]);
}

#[test]
fn test_unknown_opcode_is_not_fatal() {
    let mut machine = boot(&[
        0x01, 0x23, // SYS 0x123
        0x60, 0x2A, // LD V0, 0x2A
    ]);
    assert_eq!(machine.step(), Ok(StepOutcome::Unknown(0x0123)));
    run(&mut machine, 1);
    assert_eq!(machine.registers().v[0x0], 0x2A);
    assert_eq!(machine.fault(), None);
}
