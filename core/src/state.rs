use crate::constants::{PROGRAM_START, STACK_SIZE};
use crate::error::Fault;

/// Whether the processor dispatches instructions or sits on `LD Vx, K`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Waiting for any key; the pressed key's index goes to `V[register]`
    AwaitingKey { register: u8 },
}

/// The processor's registers
///
/// ## Registers
/// - (v) 16 8-bit registers V0..VF
///     - V0..VE are general purpose
///     - VF is the flag register, written as a side effect of arithmetic, shifts and draws
/// - (i) the 16-bit index register, which holds memory addresses
///
/// ## Control
/// - (pc) the 16-bit program counter, starting at 0x200
/// - (stack, sp) 16 return addresses and the number of them in use (0..=16)
/// - (opcode) the most recently fetched instruction word
/// - (run_state) running, or blocked on a key press
///
/// ## Timers
/// - 8-bit delay and sound timers, counting down to zero at 60Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub opcode: u16,
    pub run_state: RunState,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            delay_timer: 0,
            sound_timer: 0,
            opcode: 0,
            run_state: RunState::Running,
        }
    }

    /// The address the current opcode was fetched from
    pub fn instruction_addr(&self) -> u16 {
        self.pc.wrapping_sub(2)
    }

    /// Push the current pc onto the call stack
    pub fn push_return(&mut self) -> Result<(), Fault> {
        let addr = self.instruction_addr();
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Fault::StackOverflow { addr })?;
        *slot = self.pc;
        self.sp += 1;
        Ok(())
    }

    /// Pop the most recent return address off the call stack
    pub fn pop_return(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow {
                addr: self.instruction_addr(),
            });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Count both timers down by `ticks`, stopping at zero
    pub fn decay_timers(&mut self, ticks: u32) {
        let ticks = ticks.min(u8::MAX as u32) as u8;
        self.delay_timer = self.delay_timer.saturating_sub(ticks);
        self.sound_timer = self.sound_timer.saturating_sub(ticks);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_state() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.i, 0);
        assert_eq!(state.v, [0; 16]);
        assert_eq!(state.run_state, RunState::Running);
    }

    #[test]
    fn test_push_and_pop() {
        let mut state = State::new();
        state.pc = 0x206;
        state.push_return().unwrap();
        assert_eq!(state.sp, 1);
        assert_eq!(state.stack[0], 0x206);
        state.pc = 0x302;
        assert_eq!(state.pop_return(), Ok(0x206));
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_push_full_stack_overflows() {
        let mut state = State::new();
        for _ in 0..16 {
            state.push_return().unwrap();
        }
        state.pc = 0x20A;
        assert_eq!(
            state.push_return(),
            Err(Fault::StackOverflow { addr: 0x208 })
        );
        assert_eq!(state.sp, 16);
    }

    #[test]
    fn test_pop_empty_stack_underflows() {
        let mut state = State::new();
        state.pc = 0x202;
        assert_eq!(
            state.pop_return(),
            Err(Fault::StackUnderflow { addr: 0x200 })
        );
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_timers_stop_at_zero() {
        let mut state = State::new();
        state.delay_timer = 3;
        state.sound_timer = 1;
        state.decay_timers(2);
        assert_eq!((state.delay_timer, state.sound_timer), (1, 0));
        state.decay_timers(1000);
        assert_eq!((state.delay_timer, state.sound_timer), (0, 0));
    }
}
