//! Mapper 0 (NROM): no bank switching, 16 or 32 KiB PRG.

use crate::cartridge::mapper::mapper::Mapper;

/// NROM with one 16 KiB PRG bank: $C000–$FFFF mirrors $8000–$BFFF.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nrom128;

/// NROM with two PRG banks filling $8000–$FFFF; nothing is folded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nrom256;

impl Mapper for Nrom128 {
    fn translate(&self, addr: u16) -> u16 {
        match addr {
            0xC000..=0xFFFF => addr & 0xBFFF,
            _ => addr,
        }
    }

    fn name(&self) -> &'static str {
        "NROM-128"
    }
}

impl Mapper for Nrom256 {
    fn translate(&self, addr: u16) -> u16 {
        addr
    }

    fn name(&self) -> &'static str {
        "NROM-256"
    }
}
