use std::time::Duration;

use emu8_core::constants::{FONT_START, MAX_PROGRAM_SIZE, SPRITE_SHEET};
use emu8_core::{Chip8, Chip8Error, Clock, Cycle, Rom};

fn boot(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(8);
    chip8.reset();
    chip8.load_program(program).unwrap();
    chip8
}

fn run(chip8: &mut Chip8, cycles: usize) {
    for _ in 0..cycles {
        chip8.step().unwrap();
    }
}

#[test]
fn reset_establishes_a_clean_machine() {
    let mut chip8 = boot(&[0x60, 0xFF, 0xA3, 0x00, 0xF0, 0x55]);
    run(&mut chip8, 3);
    chip8.reset();

    let state = chip8.state();
    assert_eq!(state.pc, 0x200);
    assert_eq!(state.i, 0);
    assert!(state.v.iter().all(|&v| v == 0));
    assert!(state.frame_buffer.is_blank());
    let font = FONT_START as usize;
    assert_eq!(state.memory[font..font + SPRITE_SHEET.len()], SPRITE_SHEET[..]);
    assert_eq!(state.memory[0x300], 0);
}

#[test]
fn program_size_limit() {
    let mut chip8 = Chip8::new();
    let program = vec![0x5A; MAX_PROGRAM_SIZE];
    chip8.load_program(&program).unwrap();
    assert_eq!(chip8.state().memory[0x200..], program[..]);

    let result = chip8.load_program(&vec![0x5A; MAX_PROGRAM_SIZE + 1]);
    assert!(matches!(result, Err(Chip8Error::ProgramTooLarge { .. })));
}

#[test]
fn rom_is_handed_over_by_value() {
    let rom = Rom::read_from(&mut &[0x6A, 0x05, 0x7A, 0x10][..]).unwrap();
    let mut chip8 = Chip8::with_seed(0);
    chip8.load_rom(rom).unwrap();
    run(&mut chip8, 2);
    assert_eq!(chip8.state().v[0xA], 0x15);
}

#[test]
fn clear_screen_after_drawing() {
    // LD I, font 0; DRW V0, V0, 5; CLS
    let mut chip8 = boot(&[0xA0, 0x50, 0xD0, 0x05, 0x00, 0xE0]);
    run(&mut chip8, 2);
    assert!(!chip8.frame().is_blank());
    run(&mut chip8, 1);
    assert!(chip8.frame().is_blank());
}

#[test]
fn load_then_add_immediate() {
    let mut chip8 = boot(&[0x6A, 0x05, 0x7A, 0x10]);
    run(&mut chip8, 1);
    assert_eq!(chip8.state().v[0xA], 5);
    run(&mut chip8, 1);
    assert_eq!(chip8.state().v[0xA], 0x15);
}

#[test]
fn add_registers_sets_carry() {
    let mut chip8 = boot(&[0x61, 250, 0x62, 10, 0x81, 0x24]);
    run(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x1], 4);
    assert_eq!(chip8.state().v[0xF], 1);

    let mut chip8 = boot(&[0x61, 10, 0x62, 250, 0x81, 0x24]);
    run(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x1], 4);
    assert_eq!(chip8.state().v[0xF], 1);

    let mut chip8 = boot(&[0x61, 10, 0x62, 240, 0x81, 0x24]);
    run(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x1], 250);
    assert_eq!(chip8.state().v[0xF], 0);
}

#[test]
fn sprite_wraps_around_the_right_edge() {
    // LD V0, 60; LD V1, 0; LD I, 0x20C; DRW V0, V1, 1; DRW V0, V1, 1; 0x20C: 0xFF
    let program = [
        0x60, 60, 0x61, 0, 0xA2, 0x0C, 0xD0, 0x11, 0xD0, 0x11, 0x00, 0x00, 0xFF, 0x00,
    ];
    let mut chip8 = boot(&program);
    run(&mut chip8, 4);
    {
        let frame = chip8.frame();
        for x in (60..64).chain(0..4) {
            assert!(frame.get(x, 0), "pixel {} should be on", x);
        }
        assert!(!frame.get(4, 0));
        assert!(!frame.get(59, 0));
        assert!(!frame.get(0, 1));
    }
    assert_eq!(chip8.state().v[0xF], 0);

    // drawing the same sprite again erases it and reports the collision
    run(&mut chip8, 1);
    assert!(chip8.frame().is_blank());
    assert_eq!(chip8.state().v[0xF], 1);
}

#[test]
fn wait_for_key_repeats_until_pressed() {
    // LD V5, K; LD V6, 0x01
    let mut chip8 = boot(&[0xF5, 0x0A, 0x66, 0x01]);
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x200);
    assert_eq!(chip8.step().unwrap(), Cycle::AwaitingKey { x: 5 });
    assert_eq!(chip8.state().pc, 0x200);

    let mut keys = [false; 16];
    keys[0xB] = true;
    keys[0x9] = true;
    chip8.set_keypad(keys);
    assert_eq!(chip8.step().unwrap(), Cycle::KeyReceived { x: 5, key: 0x9 });
    assert_eq!(chip8.state().v[0x5], 0x9);
    assert_eq!(chip8.state().pc, 0x202);

    run(&mut chip8, 1);
    assert_eq!(chip8.state().v[0x6], 0x01);
}

#[test]
fn timers_follow_the_clock_not_the_cpu() {
    // LD V0, 0x3C; LD DT, V0; LD ST, V0; JP 0x206
    let mut chip8 = boot(&[0x60, 0x3C, 0xF0, 0x15, 0xF0, 0x18, 0x12, 0x06]);
    let mut clock = Clock::new(60_000);

    // a thousand cycles fit inside a single 60Hz period
    let ticks = clock.advance(Duration::from_micros(16_700));
    assert!(ticks.cycles >= 1000);
    assert_eq!(ticks.timer_ticks, 1);
    for _ in 0..1000 {
        chip8.step().unwrap();
    }
    for _ in 0..ticks.timer_ticks {
        chip8.tick_timers();
    }
    assert_eq!(chip8.state().delay_timer, 0x3C - 1);
    assert_eq!(chip8.state().sound_timer, 0x3C - 1);

    // half a second later, 30 more ticks regardless of how many cycles ran
    let ticks = clock.advance(Duration::from_millis(500));
    assert_eq!(ticks.timer_ticks, 30);
    for _ in 0..ticks.timer_ticks {
        chip8.tick_timers();
    }
    assert_eq!(chip8.state().delay_timer, 0x3C - 31);
}

#[test]
fn bcd_and_register_dump_round_trip_through_memory() {
    // LD V0, 234; LD I, 0x300; LD B, V0; LD V2, [I]
    let mut chip8 = boot(&[0x60, 234, 0xA3, 0x00, 0xF0, 0x33, 0xF2, 0x65]);
    run(&mut chip8, 4);
    assert_eq!(chip8.state().memory[0x300..0x303], [2, 3, 4]);
    assert_eq!(chip8.state().v[0..3], [2, 3, 4]);
}

#[test]
fn glyph_lookup_points_at_the_sprite_sheet() {
    // LD V0, 0xB; LD F, V0
    let mut chip8 = boot(&[0x60, 0x0B, 0xF0, 0x29]);
    run(&mut chip8, 2);
    let i = chip8.state().i as usize;
    assert_eq!(i, 0x050 + 0xB * 5);
    assert_eq!(chip8.state().memory[i..i + 5], [0xE0, 0x90, 0xE0, 0x90, 0xE0]);
}

#[test]
fn subroutine_call_and_return() {
    // 0x200: CALL 0x206; 0x202: LD V1, 1; 0x204: JP 0x204; 0x206: LD V0, 7; RET
    let mut chip8 = boot(&[0x22, 0x06, 0x61, 0x01, 0x12, 0x04, 0x60, 0x07, 0x00, 0xEE]);
    run(&mut chip8, 4);
    assert_eq!(chip8.state().v[0x0], 7);
    assert_eq!(chip8.state().v[0x1], 1);
    assert_eq!(chip8.state().sp, 0);
    assert_eq!(chip8.state().pc, 0x204);
}

#[test]
fn jumping_off_the_end_of_memory_faults() {
    // LD V0, 0xFF; JP V0, 0xF01 -> 0x1000
    let mut chip8 = boot(&[0x60, 0xFF, 0xBF, 0x01]);
    run(&mut chip8, 2);
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::OutOfBoundsFetch { pc: 0x1000 })
    ));
}
