use std::io::Read;
use std::time::Duration;

use log::{debug, log_enabled, trace, Level};

use crate::error::{Fault, RomError};
use crate::frame_buffer::FrameBuffer;
use crate::instruction::{decode, disassemble};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::state::{RunState, State};
use crate::timer::TimerClock;

/// What a single call to `Machine::step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Fetched, decoded and executed the given word
    Executed(u16),
    /// Still blocked on `LD Vx, K` with no key down
    AwaitingKey,
    /// A key arrived for `LD Vx, K`; execution resumes next step
    KeyReceived(u8),
}

/// # Machine
/// One emulated machine: processor state, memory, display and the keypad latch it reads.
///
/// Supplies interfaces for:
/// - resetting and loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers by real elapsed time
/// - inspecting its frame buffer for rendering by some display
pub struct Machine {
    pub(crate) state: State,
    pub(crate) memory: Memory,
    pub(crate) frame_buffer: FrameBuffer,
    pub(crate) keypad: Keypad,
    pub(crate) draw_flag: bool,
    clock: TimerClock,
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            state: State::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            keypad: Keypad::new(),
            draw_flag: true,
            clock: TimerClock::new(),
        }
    }

    /// Return to the boot state: zeroed registers and memory, font loaded, display cleared.
    /// The keypad is left alone since the host owns it.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.memory.reset();
        self.frame_buffer.clear();
        self.clock.reset();
        self.draw_flag = true;
    }

    /// Load a program image at 0x200
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), RomError> {
        self.memory.load_program(program)?;
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a rom from some source, reading it to the end
    ///
    /// # Arguments
    /// * `reader` a reader positioned at the start of a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, RomError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_program(&rom)?;
        Ok(rom.len())
    }

    /// Set the pressed status of key
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// Replace the keypad latch with a snapshot taken by the host
    pub fn set_keypad(&mut self, keypad: Keypad) {
        self.keypad = keypad;
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Returns a copy of the FrameBuffer if it changed since the last call
    pub fn get_frame(&mut self) -> Option<FrameBuffer> {
        if std::mem::take(&mut self.draw_flag) {
            Some(self.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the sound timer is running; a host with audio would beep while this holds
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Advances the CPU by a single cycle
    /// - while awaiting a key, checks the keypad instead of fetching
    /// - otherwise fetches the word at pc, moves pc past it, then executes it
    pub fn step(&mut self) -> Result<Step, Fault> {
        if let RunState::AwaitingKey { register } = self.state.run_state {
            return Ok(match self.keypad.first_pressed() {
                Some(key) => {
                    debug!("key {:X} -> V{:X}", key, register);
                    self.state.v[register as usize] = key;
                    self.state.run_state = RunState::Running;
                    Step::KeyReceived(key)
                }
                None => Step::AwaitingKey,
            });
        }

        let addr = self.state.pc;
        let word = self.memory.word(addr)?;
        self.state.opcode = word;
        self.state.pc = addr + 0x2;

        let instruction = decode(word).ok_or(Fault::Decode { word, addr })?;
        if log_enabled!(Level::Trace) {
            trace!(
                "{:03X}: {:04X} {:<14} v{:02X?} i{:03X}",
                addr,
                word,
                disassemble(word).unwrap_or_default(),
                self.state.v,
                self.state.i
            );
        }
        (instruction.handler)(word, self)?;
        Ok(Step::Executed(word))
    }

    /// Count the delay and sound timers down by however many 60Hz ticks fit in `elapsed`.
    /// Returns the number of ticks applied.
    pub fn advance_timers(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.clock.advance(elapsed);
        if ticks > 0 {
            self.state.decay_timers(ticks);
        }
        ticks
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
