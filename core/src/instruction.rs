use crate::opcode::Opcode;
use crate::operations::*;

/// Which part of the word picks the operation within a family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// The family alone identifies the operation
    Any,
    /// `[___n]`
    Nibble(u8),
    /// `[__kk]`
    Byte(u8),
}

impl Selector {
    /// The selector a word is looked up with, based on its family
    pub fn of(op: u16) -> Self {
        match op.nibbles() {
            (0x0 | 0xE | 0xF, ..) => Selector::Byte(op.kk()),
            (0x5 | 0x8 | 0x9, .., n) => Selector::Nibble(n),
            _ => Selector::Any,
        }
    }
}

/// One entry of the dispatch table
pub struct Instruction {
    pub family: u8,
    pub selector: Selector,
    /// Assembler syntax; operand placeholders are `Vx`, `Vy`, `kk`, `nnn` and `n`
    pub syntax: &'static str,
    pub handler: Handler,
}

const fn entry(family: u8, selector: Selector, syntax: &'static str, handler: Handler) -> Instruction {
    Instruction {
        family,
        selector,
        syntax,
        handler,
    }
}

use Selector::{Any, Byte, Nibble};

/// Every instruction the interpreter knows, keyed by `(family, selector)`
pub static INSTRUCTIONS: [Instruction; 34] = [
    entry(0x0, Byte(0xE0), "CLS", cls),
    entry(0x0, Byte(0xEE), "RET", ret),
    entry(0x1, Any, "JP nnn", jp),
    entry(0x2, Any, "CALL nnn", call),
    entry(0x3, Any, "SE Vx, kk", se_byte),
    entry(0x4, Any, "SNE Vx, kk", sne_byte),
    entry(0x5, Nibble(0x0), "SE Vx, Vy", se_reg),
    entry(0x6, Any, "LD Vx, kk", ld_byte),
    entry(0x7, Any, "ADD Vx, kk", add_byte),
    entry(0x8, Nibble(0x0), "LD Vx, Vy", ld_reg),
    entry(0x8, Nibble(0x1), "OR Vx, Vy", or),
    entry(0x8, Nibble(0x2), "AND Vx, Vy", and),
    entry(0x8, Nibble(0x3), "XOR Vx, Vy", xor),
    entry(0x8, Nibble(0x4), "ADD Vx, Vy", add_reg),
    entry(0x8, Nibble(0x5), "SUB Vx, Vy", sub),
    entry(0x8, Nibble(0x6), "SHR Vx", shr),
    entry(0x8, Nibble(0x7), "SUBN Vx, Vy", subn),
    entry(0x8, Nibble(0xE), "SHL Vx", shl),
    entry(0x9, Nibble(0x0), "SNE Vx, Vy", sne_reg),
    entry(0xA, Any, "LD I, nnn", ld_i),
    entry(0xB, Any, "JP V0, nnn", jp_v0),
    entry(0xC, Any, "RND Vx, kk", rnd),
    entry(0xD, Any, "DRW Vx, Vy, n", drw),
    entry(0xE, Byte(0x9E), "SKP Vx", skp),
    entry(0xE, Byte(0xA1), "SKNP Vx", sknp),
    entry(0xF, Byte(0x07), "LD Vx, DT", ld_vx_dt),
    entry(0xF, Byte(0x0A), "LD Vx, K", ld_vx_k),
    entry(0xF, Byte(0x15), "LD DT, Vx", ld_dt),
    entry(0xF, Byte(0x18), "LD ST, Vx", ld_st),
    entry(0xF, Byte(0x1E), "ADD I, Vx", add_i),
    entry(0xF, Byte(0x29), "LD F, Vx", ld_f),
    entry(0xF, Byte(0x33), "LD B, Vx", ld_b),
    entry(0xF, Byte(0x55), "LD [I], Vx", ld_store),
    entry(0xF, Byte(0x65), "LD Vx, [I]", ld_load),
];

/// Selects the table entry for a fetched word
pub fn decode(op: u16) -> Option<&'static Instruction> {
    let (family, selector) = (op.family(), Selector::of(op));
    INSTRUCTIONS
        .iter()
        .find(|i| i.family == family && i.selector == selector)
}

/// Renders a word in assembler notation, e.g. `ADD V0, V1` or `LD I, 0x250`
pub fn disassemble(op: u16) -> Option<String> {
    let instruction = decode(op)?;
    let (mnemonic, operands) = match instruction.syntax.split_once(' ') {
        Some(split) => split,
        None => return Some(instruction.syntax.to_string()),
    };
    let operands: Vec<String> = operands
        .split(", ")
        .map(|operand| match operand {
            "Vx" => format!("V{:X}", op.x()),
            "Vy" => format!("V{:X}", op.y()),
            "kk" => format!("{:#04X}", op.kk()),
            "nnn" => format!("{:#05X}", op.nnn()),
            "n" => op.n().to_string(),
            fixed => fixed.to_string(),
        })
        .collect();
    Some(format!("{} {}", mnemonic, operands.join(", ")))
}
