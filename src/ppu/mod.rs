//! PPU (Picture Processing Unit) timing for the NES.
//!
//! See [PPU frame timing](https://www.nesdev.org/wiki/PPU_frame_timing). Handles 341-dot
//! scanlines, the vblank flag in PPUSTATUS and the NMI request at the start of vblank.

pub mod ppu;

#[cfg(test)]
mod tests;
