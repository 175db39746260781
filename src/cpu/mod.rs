//! 6502 CPU emulation for the NES.
//!
//! Documented instruction set, decoded through an immutable opcode table.
//! Bus trait used for memory and I/O; NMI arrives through `CPU::raise_nmi`.

pub mod cpu;
pub mod flags;
pub mod instructions;
pub mod opcodes;
