//! NES mappers for PRG address translation.
//!
//! Mapper0 (NROM) in its one- and two-bank wirings, plus selection by header.

use crate::cartridge::cartridge::{CartridgeError, Header};

pub mod mapper;

pub mod mapper0;

/// Pick the mapper for a cartridge. Unknown mapper numbers are rejected here,
/// at load time, never while running.
pub fn for_header(header: &Header) -> Result<Box<dyn mapper::Mapper>, CartridgeError> {
    match header.mapper_number() {
        0 if header.prg_banks == 1 => Ok(Box::new(mapper0::Nrom128)),
        0 => Ok(Box::new(mapper0::Nrom256)),
        n => Err(CartridgeError::UnsupportedMapper(n)),
    }
}
