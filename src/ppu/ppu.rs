//! 2C02 frame timing.
//!
//! Counts dots (341 per scanline) and scanlines, sets the vblank bit of
//! PPUSTATUS at scanline 241 dot 1 and clears it again at scanline 261 dot 1.
//! No pixels are produced.

use log::debug;

use crate::bus::{Bus, PPU_STATUS};

pub const DOTS_PER_SCANLINE: u16 = 341;
/// First scanline of vertical blank.
pub const VBLANK_SCANLINE: u16 = 241;
/// Pre-render scanline; reaching it ends the frame.
pub const PRE_RENDER_SCANLINE: u16 = 261;
/// PPU dots per CPU cycle.
pub const DOTS_PER_CPU_CYCLE: u16 = 3;

const VBLANK_BIT: u8 = 0x80;

#[derive(Debug, Default)]
pub struct PPU {
    dot: u16,
    scanline: u16,
    nmi: bool,
    vblank: bool,
    /// Frames completed since reset.
    frame: u64,
}

impl PPU {
    /// Create PPU in initial state (scanline 0, dot 0).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.dot = 0;
        self.scanline = 0;
        self.nmi = false;
        self.vblank = false;
        self.frame = 0;
    }

    /// Advance by `dots`, one dot at a time. Returns true if vblank began
    /// during this call, i.e. the CPU's NMI line should be raised.
    pub fn step(&mut self, dots: u16, regs: &mut impl Bus) -> bool {
        let mut raised = false;
        for _ in 0..dots {
            raised |= self.tick(regs);
        }
        raised
    }

    /// Advance by a single dot.
    pub fn tick(&mut self, regs: &mut impl Bus) -> bool {
        self.dot += 1;

        // Start of vblank (scanline 241, dot 1)
        if self.scanline == VBLANK_SCANLINE && self.dot == 1 {
            self.vblank = true;
            self.nmi = true;
            let status = regs.read(PPU_STATUS);
            regs.write(PPU_STATUS, status | VBLANK_BIT);
            debug!("vblank start, frame {}", self.frame);
            return true;
        }

        // End of frame (scanline 261, dot 1)
        if self.scanline == PRE_RENDER_SCANLINE && self.dot == 1 {
            self.vblank = false;
            self.nmi = false;
            let status = regs.read(PPU_STATUS);
            regs.write(PPU_STATUS, status & !VBLANK_BIT);
            self.scanline = 0;
            self.frame += 1;
            debug!("vblank end, {} frames", self.frame);
            return false;
        }

        if self.dot == DOTS_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
        }
        false
    }

    pub fn dot(&self) -> u16 {
        self.dot
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    /// NMI condition raised at vblank start and not yet cleared by the pre-render line.
    pub fn nmi_pending(&self) -> bool {
        self.nmi
    }

    pub fn vblank(&self) -> bool {
        self.vblank
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
