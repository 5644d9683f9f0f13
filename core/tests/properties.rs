use emu8_core::{Chip8, Chip8Error, Instruction, Opcode};
use proptest::prelude::*;

fn boot(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(0);
    chip8.reset();
    chip8.load_program(program).unwrap();
    chip8
}

proptest! {
    #[test]
    fn decode_never_panics(word in any::<u16>()) {
        match Instruction::decode(Opcode(word)) {
            Ok(_) => {}
            Err(Chip8Error::UnknownOpcode(code)) => prop_assert_eq!(code, word),
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }

    #[test]
    fn failed_step_changes_nothing(word in any::<u16>()) {
        let mut chip8 = boot(&word.to_be_bytes());
        let before = *chip8.state();
        if chip8.step().is_err() {
            let after = chip8.state();
            prop_assert_eq!(after.pc, before.pc);
            prop_assert_eq!(after.v, before.v);
            prop_assert_eq!(after.i, before.i);
            prop_assert_eq!(after.sp, before.sp);
            prop_assert_eq!(&after.memory[..], &before.memory[..]);
            prop_assert!(after.frame_buffer == before.frame_buffer);
        }
    }

    #[test]
    fn add_registers_is_nine_bit_addition(a in any::<u8>(), b in any::<u8>()) {
        let mut chip8 = boot(&[0x61, a, 0x62, b, 0x81, 0x24]);
        for _ in 0..3 {
            chip8.step().unwrap();
        }
        let sum = u16::from(a) + u16::from(b);
        prop_assert_eq!(chip8.state().v[0x1], (sum & 0xFF) as u8);
        prop_assert_eq!(chip8.state().v[0xF], (sum > 0xFF) as u8);
    }

    #[test]
    fn subtraction_flags_match_comparison(a in any::<u8>(), b in any::<u8>()) {
        let mut chip8 = boot(&[0x61, a, 0x62, b, 0x81, 0x25]);
        for _ in 0..3 {
            chip8.step().unwrap();
        }
        prop_assert_eq!(chip8.state().v[0x1], a.wrapping_sub(b));
        prop_assert_eq!(chip8.state().v[0xF], (a > b) as u8);
    }

    #[test]
    fn steps_never_move_timers(cycles in 1usize..2000) {
        // LD V0, 0x80; LD DT, V0; JP 0x204
        let mut chip8 = boot(&[0x60, 0x80, 0xF0, 0x15, 0x12, 0x04]);
        for _ in 0..cycles {
            chip8.step().unwrap();
        }
        let expected = if cycles >= 2 { 0x80 } else { 0 };
        prop_assert_eq!(chip8.state().delay_timer, expected);
    }
}
