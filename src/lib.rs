//! Nesdot: the timing core of an NES (Nintendo Entertainment System) emulator.
//!
//! Implements the parts of the chipset documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide) that decide *when* things
//! happen: the Ricoh 2A03's 6502 core, the CPU address space and the 2C02's frame timing.
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM and PPU register
//!   mirrors, cartridge space through the mapper
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0)
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: documented opcodes, [NMI](https://www.nesdev.org/wiki/NMI)
//! - **ppu** – [PPU frame timing](https://www.nesdev.org/wiki/PPU_frame_timing): dots, scanlines, vblank
//! - **nes** – CPU and PPU coupled at 3 dots per CPU cycle
//! - **logger** – coloured `log` backend used by the binary

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod logger;
pub mod nes;
pub mod ppu;
