use thiserror::Error;

use vm8_core::{Fault, RomError};

/// Anything that ends the process early
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Rom(#[from] RomError),

    #[error("{0}")]
    Fault(#[from] Fault),

    #[error("SDL error: {0}")]
    Sdl(String),
}
