//! The console: one CPU and one PPU sharing a `NesBus`.
//!
//! Each `step` runs one CPU instruction, then advances the PPU by three dots
//! per CPU cycle. A vblank reported by the PPU is latched on the CPU's NMI
//! line and taken at the start of the following step.

use log::info;

use crate::{
    bus::NesBus,
    cartridge::cartridge::{Cartridge, CartridgeError},
    cpu::cpu::{CPU, CpuError, Step},
    ppu::ppu::{DOTS_PER_CPU_CYCLE, PPU},
};

pub struct Nes {
    pub cpu: CPU<NesBus>,
    pub ppu: PPU,
}

impl Nes {
    /// Power on with `cart` inserted. The machine still needs a `reset`.
    pub fn new(cart: &Cartridge) -> Result<Self, CartridgeError> {
        let bus = NesBus::load(cart)?;
        Ok(Self {
            cpu: CPU::new(bus),
            ppu: PPU::new(),
        })
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
        self.ppu.reset();
    }

    /// One instruction and the PPU dots it pays for.
    pub fn step(&mut self) -> Result<Step, CpuError> {
        let step = self.cpu.step()?;
        if self
            .ppu
            .step(step.cycles * DOTS_PER_CPU_CYCLE, &mut self.cpu.bus)
        {
            self.cpu.raise_nmi();
        }
        Ok(step)
    }

    /// Step until the PPU finishes the current frame. Returns the CPU cycles spent.
    pub fn run_frame(&mut self) -> Result<u64, CpuError> {
        let frame = self.ppu.frame();
        let start = self.cpu.cycles;
        while self.ppu.frame() == frame {
            self.step()?;
        }
        Ok(self.cpu.cycles - start)
    }

    /// Run `frames` whole frames, logging each completed one.
    pub fn run_frames(&mut self, frames: u64) -> Result<(), CpuError> {
        for _ in 0..frames {
            let cycles = self.run_frame()?;
            info!("frame {} done in {} cycles", self.ppu.frame(), cycles);
        }
        Ok(())
    }

    pub fn frame(&self) -> u64 {
        self.ppu.frame()
    }

    pub fn bus(&mut self) -> &mut NesBus {
        &mut self.cpu.bus
    }
}
