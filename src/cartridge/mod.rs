//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: Parses iNES (.nes) images into header fields and PRG/CHR data.
//! - **mapper**: NROM (0) address translation and mapper selection.

pub mod cartridge;
pub mod mapper;

#[cfg(test)]
mod tests;
