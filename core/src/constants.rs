use std::time::Duration;

/// Size of the flat address space in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Where ROMs are loaded and where the program counter starts
pub const PROGRAM_START: u16 = 0x200;

/// Where the font sprite sheet lives in memory
pub const FONT_START: u16 = 0x050;

/// Each font glyph is 5 rows tall
pub const GLYPH_HEIGHT: u16 = 5;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of return addresses the call stack can hold
pub const STACK_SIZE: usize = 16;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// The delay and sound timers count down at 60Hz regardless of the instruction rate
pub const TIMER_HZ: u32 = 60;

/// Default time between instruction dispatches (~700Hz)
pub const DEFAULT_CYCLE_DELAY: Duration = Duration::from_micros(1428);

/// # Sprite Sheet
/// Hexadecimal digits 0..F, each 4 pixels wide and 5 pixels tall.
///
/// Each byte is one row of a glyph; only the high nibble is ever lit.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
