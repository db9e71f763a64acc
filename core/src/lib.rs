//! An interpreter for a small 8-bit virtual machine with a 64x32 monochrome display.
//!
//! The crate holds everything with semantics: memory, registers, the instruction table,
//! sprite drawing, timers and the cycle loop. Windows, keyboards and files belong to
//! whoever implements `Host`.

pub use constants::{DEFAULT_CYCLE_DELAY, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use cycle::{run, Exit, Host, RunConfig};
pub use error::{Fault, RomError};
pub use frame_buffer::FrameBuffer;
pub use instruction::disassemble;
pub use keypad::Keypad;
pub use machine::{Machine, Step};
pub use state::{RunState, State};

pub mod constants;
mod cycle;
mod error;
mod frame_buffer;
pub mod instruction;
mod keypad;
mod machine;
pub mod memory;
mod opcode;
mod operations;
mod state;
mod timer;
