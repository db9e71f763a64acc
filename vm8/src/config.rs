use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::debug;
use serde::Deserialize;

use vm8_core::{RunConfig, DEFAULT_CYCLE_DELAY};

use crate::error::Error;

/// Config file looked for in the working directory when `--config` isn't given
const DEFAULT_CONFIG_FILE: &str = "vm8.toml";
const DEFAULT_SCALE: u32 = 10;

/// Settings as given on the command line or in a config file; anything may be missing
#[derive(Parser, Deserialize, Debug, Default)]
#[command(author, version, about)]
#[serde(deny_unknown_fields)]
pub struct OptionalConfig {
    /// Microseconds between instruction dispatches. Defaults to 1428 (~700 instructions per second)
    #[arg(short, long)]
    pub cycle_delay_us: Option<u64>,

    /// Each pixel is scaled by this factor. Defaults to 10
    #[arg(short, long)]
    pub scale: Option<u32>,

    /// A TOML file with defaults for any of these options. Defaults to ./vm8.toml if it exists
    #[arg(long)]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// The ROM to run
    pub rom: Option<PathBuf>,
}

impl OptionalConfig {
    pub fn get_args() -> Self {
        Self::parse()
    }

    /// Reads a config file. A missing default file is fine; a missing explicit one isn't.
    pub fn get_toml(path: Option<&Path>) -> Result<Self, Error> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        let config_error = |e: &dyn std::fmt::Display| Error::Config(format!("{}: {}", path.display(), e));
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                debug!("reading config from {}", path.display());
                Self::from_toml(&contents).map_err(|e| config_error(&e))
            }
            Err(e) if explicit => Err(config_error(&e)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Values in `self` win over values in `rhs`
    pub fn merge(self, rhs: Self) -> Self {
        Self {
            cycle_delay_us: self.cycle_delay_us.or(rhs.cycle_delay_us),
            scale: self.scale.or(rhs.scale),
            config: self.config.or(rhs.config),
            rom: self.rom.or(rhs.rom),
        }
    }
}

/// Fully resolved settings
#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub rom: PathBuf,
    pub cycle_delay: Duration,
    pub scale: u32,
}

impl TryFrom<OptionalConfig> for Config {
    type Error = Error;

    fn try_from(config: OptionalConfig) -> Result<Self, Error> {
        let rom = config
            .rom
            .ok_or_else(|| Error::Config("no ROM file specified".to_string()))?;
        let scale = config.scale.unwrap_or(DEFAULT_SCALE);
        if scale == 0 {
            return Err(Error::Config("scale must be at least 1".to_string()));
        }
        Ok(Self {
            rom,
            cycle_delay: config
                .cycle_delay_us
                .map(Duration::from_micros)
                .unwrap_or(DEFAULT_CYCLE_DELAY),
            scale,
        })
    }
}

impl Config {
    /// Command line over config file over defaults
    pub fn get() -> Result<Self, Error> {
        let args = OptionalConfig::get_args();
        let file = OptionalConfig::get_toml(args.config.as_deref())?;
        let config = Config::try_from(args.merge(file))?;
        debug!("{:?}", config);
        Ok(config)
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            cycle_delay: self.cycle_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = OptionalConfig::parse_from(["vm8", "--scale", "4", "-c", "2000", "pong.ch8"]);
        assert_eq!(args.scale, Some(4));
        assert_eq!(args.cycle_delay_us, Some(2000));
        assert_eq!(args.rom, Some(PathBuf::from("pong.ch8")));
    }

    #[test]
    fn test_toml_parse() {
        let file = OptionalConfig::from_toml("scale = 8\ncycle_delay_us = 500\n").unwrap();
        assert_eq!(file.scale, Some(8));
        assert_eq!(file.cycle_delay_us, Some(500));
        assert_eq!(file.rom, None);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(OptionalConfig::from_toml("colour = \"green\"\n").is_err());
    }

    #[test]
    fn test_args_override_file() {
        let args = OptionalConfig::parse_from(["vm8", "--scale", "4", "game.ch8"]);
        let file = OptionalConfig::from_toml("scale = 8\ncycle_delay_us = 500\n").unwrap();
        let config = Config::try_from(args.merge(file)).unwrap();
        assert_eq!(
            config,
            Config {
                rom: PathBuf::from("game.ch8"),
                cycle_delay: Duration::from_micros(500),
                scale: 4,
            }
        );
    }

    #[test]
    fn test_defaults() {
        let args = OptionalConfig::parse_from(["vm8", "game.ch8"]);
        let config = Config::try_from(args.merge(OptionalConfig::default())).unwrap();
        assert_eq!(config.scale, 10);
        assert_eq!(config.cycle_delay, DEFAULT_CYCLE_DELAY);
    }

    #[test]
    fn test_missing_rom_is_an_error() {
        let args = OptionalConfig::parse_from(["vm8"]);
        assert!(matches!(Config::try_from(args), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let path = Path::new("definitely/not/here/vm8.toml");
        assert!(OptionalConfig::get_toml(Some(path)).is_err());
    }
}
