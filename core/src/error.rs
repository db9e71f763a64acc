use std::io;

use thiserror::Error;

/// Reasons a ROM can't be loaded. Raised before any cycle runs.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),

    #[error("ROM is {size} bytes but only {capacity} bytes are available above 0x200")]
    TooLarge { size: usize, capacity: usize },
}

/// Fatal conditions raised while executing a program.
///
/// None of these are recoverable; the cycle loop stops on the first one.
/// `addr` on instruction faults is the address the offending word was fetched from.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("unknown instruction {word:#06X} at {addr:#05X}")]
    Decode { word: u16, addr: u16 },

    #[error("stack overflow: CALL at {addr:#05X} with all 16 return slots in use")]
    StackOverflow { addr: u16 },

    #[error("stack underflow: RET at {addr:#05X} with an empty call stack")]
    StackUnderflow { addr: u16 },

    #[error("memory access at {addr:#X} is outside the 4096 byte address space")]
    AddressOutOfRange { addr: usize },
}
