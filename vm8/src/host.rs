use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use vm8_core::{FrameBuffer, Host, Keypad};
use vm8_display::Display;

use crate::keymap::keymap;

/// Binds SDL2 keyboard events and window to the cycle loop
pub struct SdlHost {
    events: EventPump,
    display: Display,
    /// First presentation failure; ends the run at the next poll
    failure: Option<String>,
}

impl SdlHost {
    pub fn new(events: EventPump, display: Display) -> Self {
        SdlHost {
            events,
            display,
            failure: None,
        }
    }

    pub fn take_failure(&mut self) -> Option<String> {
        self.failure.take()
    }
}

impl Host for SdlHost {
    fn poll(&mut self, keypad: &mut Keypad) -> bool {
        if self.failure.is_some() {
            return true;
        }
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    info!("quit requested");
                    return true;
                }
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(k) = keymap(key) {
                        keypad.press(k);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(k) = keymap(key) {
                        keypad.release(k);
                    }
                }
                _ => continue,
            };
        }
        false
    }

    fn present(&mut self, frame: &FrameBuffer) {
        if self.failure.is_some() {
            return;
        }
        if let Err(e) = self.display.render(frame) {
            error!("unable to render frame: {}", e);
            self.failure = Some(e);
        }
    }
}
