use sdl2::keyboard::Keycode;

/// What a physical key does to the emulator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    /// A key on the hexadecimal keypad.
    Key(u8),
    /// Run faster than the configured clock speed while held.
    FastForward,
    /// Step backwards through saved states while held.
    Rewind,
    Quit,
}

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
/// Space fast-forwards, Backspace rewinds and Escape quits.
pub fn keymap(key: Keycode) -> Option<Control> {
    let control = match key {
        Keycode::X => Control::Key(0x0),
        Keycode::Num1 => Control::Key(0x1),
        Keycode::Num2 => Control::Key(0x2),
        Keycode::Num3 => Control::Key(0x3),
        Keycode::Q => Control::Key(0x4),
        Keycode::W => Control::Key(0x5),
        Keycode::E => Control::Key(0x6),
        Keycode::A => Control::Key(0x7),
        Keycode::S => Control::Key(0x8),
        Keycode::D => Control::Key(0x9),
        Keycode::Z => Control::Key(0xA),
        Keycode::C => Control::Key(0xB),
        Keycode::Num4 => Control::Key(0xC),
        Keycode::R => Control::Key(0xD),
        Keycode::F => Control::Key(0xE),
        Keycode::V => Control::Key(0xF),
        Keycode::Space => Control::FastForward,
        Keycode::Backspace => Control::Rewind,
        Keycode::Escape => Control::Quit,
        _ => return None,
    };
    Some(control)
}
