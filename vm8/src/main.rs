use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use log::{error, info};

use vm8_core::{run, Machine};
use vm8_display::Display;

use crate::config::Config;
use crate::error::Error;
use crate::host::SdlHost;

mod config;
mod error;
mod host;
mod keymap;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), Error> {
    let config = Config::get()?;

    // Load the ROM before opening a window so a bad file fails fast
    let mut machine = Machine::new();
    let file = File::open(&config.rom).map_err(vm8_core::RomError::from)?;
    let size = machine.load_rom(&mut BufReader::new(file))?;
    info!("loaded {} ({} bytes)", config.rom.display(), size);

    let sdl = sdl2::init().map_err(Error::Sdl)?;
    let title = format!(
        "vm8 - {}",
        config
            .rom
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    );
    let display = Display::new(&sdl, &title, config.scale).map_err(Error::Sdl)?;
    let events = sdl.event_pump().map_err(Error::Sdl)?;
    let mut host = SdlHost::new(events, display);

    run(&mut machine, &mut host, config.run_config())?;

    match host.take_failure() {
        Some(e) => Err(Error::Sdl(e)),
        None => Ok(()),
    }
}
