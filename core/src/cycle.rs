use std::time::{Duration, Instant};

use log::{error, info};

use crate::constants::DEFAULT_CYCLE_DELAY;
use crate::error::Fault;
use crate::frame_buffer::FrameBuffer;
use crate::keypad::Keypad;
use crate::machine::Machine;

/// The outside world the cycle loop is driven by.
///
/// Input and presentation live on the host's side; the loop only hands over
/// copies, so the host never sees a half-drawn frame.
pub trait Host {
    /// Update the keypad latch from input.
    /// Called once per iteration; returning `true` stops the loop.
    fn poll(&mut self, keypad: &mut Keypad) -> bool;

    /// Present a frame. Only called when the frame changed since the last call.
    fn present(&mut self, frame: &FrameBuffer);
}

/// Plain parameters the cycle loop runs with
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Time between instruction dispatches
    pub cycle_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            cycle_delay: DEFAULT_CYCLE_DELAY,
        }
    }
}

/// Why the cycle loop stopped without a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
}

/// Runs the machine until the host asks to quit or the program faults.
///
/// Each iteration:
/// - polls the host for input and the quit flag
/// - counts the timers down by the real time since the previous iteration
/// - runs one step
/// - presents the frame if it changed
/// - sleeps away whatever is left of `cycle_delay`
pub fn run(machine: &mut Machine, host: &mut dyn Host, config: RunConfig) -> Result<Exit, Fault> {
    info!("running with {:?} between cycles", config.cycle_delay);
    let mut keypad = *machine.keypad();
    let mut last_cycle = Instant::now();
    let mut cycles: u64 = 0;

    loop {
        if host.poll(&mut keypad) {
            info!("quit after {} cycles", cycles);
            return Ok(Exit::Quit);
        }
        machine.set_keypad(keypad);

        let cycle_start = Instant::now();
        machine.advance_timers(cycle_start - last_cycle);
        last_cycle = cycle_start;

        if let Err(fault) = machine.step() {
            error!("stopped after {} cycles: {}", cycles, fault);
            return Err(fault);
        }
        cycles += 1;

        if let Some(frame) = machine.get_frame() {
            host.present(&frame);
        }

        let elapsed = cycle_start.elapsed();
        if config.cycle_delay > elapsed {
            std::thread::sleep(config.cycle_delay - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Presses scripted keys on given polls and quits after `quit_after` polls
    struct ScriptedHost {
        polls: usize,
        quit_after: usize,
        presses: Vec<(usize, u8)>,
        frames: Vec<FrameBuffer>,
    }

    impl ScriptedHost {
        fn new(quit_after: usize) -> Self {
            ScriptedHost {
                polls: 0,
                quit_after,
                presses: vec![],
                frames: vec![],
            }
        }
    }

    impl Host for ScriptedHost {
        fn poll(&mut self, keypad: &mut Keypad) -> bool {
            self.polls += 1;
            for &(at, key) in &self.presses {
                if at == self.polls {
                    keypad.press(key);
                }
            }
            self.polls > self.quit_after
        }

        fn present(&mut self, frame: &FrameBuffer) {
            self.frames.push(*frame);
        }
    }

    fn fast() -> RunConfig {
        RunConfig {
            cycle_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_runs_until_quit() {
        let mut machine = Machine::new();
        // LD V0, 1; ADD V0, 1; JP 0x202
        machine
            .load_program(&[0x60, 0x01, 0x70, 0x01, 0x12, 0x02])
            .unwrap();
        let mut host = ScriptedHost::new(5);
        assert_eq!(run(&mut machine, &mut host, fast()), Ok(Exit::Quit));
        assert_eq!(host.polls, 6);
        // LD, ADD, JP, ADD, JP
        assert_eq!(machine.state().v[0x0], 3);
    }

    #[test]
    fn test_fault_stops_the_loop() {
        let mut machine = Machine::new();
        machine.load_program(&[0x60, 0x01, 0x00, 0xEE]).unwrap();
        let mut host = ScriptedHost::new(100);
        assert_eq!(
            run(&mut machine, &mut host, fast()),
            Err(Fault::StackUnderflow { addr: 0x202 })
        );
        assert_eq!(host.polls, 2);
    }

    #[test]
    fn test_presents_only_changed_frames() {
        let mut machine = Machine::new();
        // LD I, 0x050; DRW V0, V0, 5; JP 0x204
        machine
            .load_program(&[0xA0, 0x50, 0xD0, 0x05, 0x12, 0x04])
            .unwrap();
        let mut host = ScriptedHost::new(6);
        run(&mut machine, &mut host, fast()).unwrap();
        // boot frame, then the frame with the glyph
        assert_eq!(host.frames.len(), 2);
        assert_eq!(host.frames[0].lit(), 0);
        assert_eq!(host.frames[1].lit(), 14);
    }

    #[test]
    fn test_key_wait_resumes_from_host_input() {
        let mut machine = Machine::new();
        // LD V5, K; JP 0x202
        machine
            .load_program(&[0xF5, 0x0A, 0x12, 0x02])
            .unwrap();
        let mut host = ScriptedHost::new(8);
        host.presses.push((4, 0xC));
        run(&mut machine, &mut host, fast()).unwrap();
        assert_eq!(machine.state().v[0x5], 0xC);
    }

    #[test]
    fn test_timers_follow_wall_clock() {
        let mut machine = Machine::new();
        // LD V0, 30; LD DT, V0; JP 0x204
        machine
            .load_program(&[0x60, 0x1E, 0xF0, 0x15, 0x12, 0x04])
            .unwrap();
        let mut host = ScriptedHost::new(10);
        let config = RunConfig {
            cycle_delay: Duration::from_millis(10),
        };
        run(&mut machine, &mut host, config).unwrap();
        // at least 80ms pass after DT is loaded, which is at least 4 ticks
        let delay = machine.state().delay_timer;
        assert!(delay <= 26, "delay timer only reached {}", delay);
        assert!(delay < 30);
    }
}
