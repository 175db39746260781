//! Memory bus and address decoding for the NES.
//!
//! The CPU sees one flat 64 KiB array. Internal RAM ($0000–$07FF) is mirrored
//! through $1FFF and the eight PPU registers ($2000–$2007) through $3FFF; those
//! folds are applied first, and every other address goes through the
//! cartridge mapper.

use log::info;

use crate::cartridge::cartridge::{Cartridge, CartridgeError};
use crate::cartridge::mapper::{self, mapper::Mapper};

/// Start of the cartridge PRG window.
pub const PRG_START: u16 = 0x8000;
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;
/// PPUSTATUS; bit 7 is the vblank flag.
pub const PPU_STATUS: u16 = 0x2002;

/// Trait for memory-mapped I/O and bus access used by the CPU and PPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    /// Little-endian word at `addr`, `addr + 1`.
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// Main NES bus: the 64 KiB address space and the cartridge mapper.
pub struct NesBus {
    mem: Box<[u8; 0x10000]>,
    mapper: Box<dyn Mapper>,
}

impl NesBus {
    /// Create an empty bus with the given mapper.
    pub fn new(mapper: Box<dyn Mapper>) -> Self {
        Self {
            mem: Box::new([0; 0x10000]),
            mapper,
        }
    }

    /// Build a bus for `cart`: pick its mapper, copy PRG to $8000 and point the
    /// reset vector at the start of PRG.
    pub fn load(cart: &Cartridge) -> Result<Self, CartridgeError> {
        let mapper = mapper::for_header(&cart.header)?;
        let window = 0x10000 - PRG_START as usize;
        if cart.prg_rom.len() > window {
            return Err(CartridgeError::PrgTooLarge(cart.prg_rom.len()));
        }

        info!(
            "loading {} PRG bytes with mapper {}",
            cart.prg_rom.len(),
            mapper.name()
        );

        let mut bus = Self::new(mapper);
        let start = PRG_START as usize;
        bus.mem[start..start + cart.prg_rom.len()].copy_from_slice(&cart.prg_rom);

        let [lo, hi] = PRG_START.to_le_bytes();
        bus.write(RESET_VECTOR, lo);
        bus.write(RESET_VECTOR + 1, hi);

        Ok(bus)
    }

    /// Effective index into the backing array for `addr`.
    pub fn translate(&self, addr: u16) -> u16 {
        match addr {
            // Internal RAM, mirrored 4x in 0x0000-0x1FFF
            0x0800..=0x1FFF => addr & 0x07FF,
            // PPU registers, mirrored every 8 bytes
            0x2008..=0x3FFF => addr & 0x2007,
            _ => self.mapper.translate(addr),
        }
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }
}

impl Bus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[self.translate(addr) as usize]
    }

    // No write protection: ROM-backed addresses simply take the value.
    fn write(&mut self, addr: u16, data: u8) {
        let index = self.translate(addr) as usize;
        self.mem[index] = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::cartridge::Header;
    use crate::cartridge::mapper::mapper0::{Nrom128, Nrom256};

    fn cartridge(prg_banks: u8, mapper: u8) -> Cartridge {
        Cartridge {
            header: Header {
                prg_banks,
                chr_banks: 0,
                flags6: mapper << 4,
                flags7: 0,
                prg_ram_size: 0,
                flags9: 0,
            },
            prg_rom: (0..prg_banks as usize * 0x4000).map(|i| i as u8).collect(),
            chr_rom: Vec::new(),
        }
    }

    #[test]
    fn ram_is_mirrored_every_2k() {
        let mut bus = NesBus::new(Box::new(Nrom256));
        bus.write(0x0000, 0xAB);

        assert_eq!(bus.read(0x0800), 0xAB);
        assert_eq!(bus.read(0x1000), 0xAB);
        assert_eq!(bus.read(0x1800), 0xAB);

        bus.write(0x1FFF, 0x12);
        assert_eq!(bus.read(0x07FF), 0x12);
    }

    #[test]
    fn ppu_registers_are_mirrored_every_8_bytes() {
        let mut bus = NesBus::new(Box::new(Nrom256));
        bus.write(0x2000, 0x5A);

        assert_eq!(bus.read(0x2008), 0x5A);
        assert_eq!(bus.read(0x2010), 0x5A);
        assert_eq!(bus.read(0x3FF8), 0x5A);

        bus.write(0x3FFA, 0x80);
        assert_eq!(bus.read(PPU_STATUS), 0x80);
    }

    #[test]
    fn apu_and_prg_ram_are_not_folded() {
        let mut bus = NesBus::new(Box::new(Nrom256));
        bus.write(0x4000, 1);
        bus.write(0x6000, 2);

        assert_eq!(bus.translate(0x4000), 0x4000);
        assert_eq!(bus.translate(0x6008), 0x6008);
        assert_eq!(bus.read(0x6000), 2);
    }

    #[test]
    fn nrom128_mirrors_upper_prg_bank() {
        let mut bus = NesBus::new(Box::new(Nrom128));
        bus.write(0x8123, 0x77);

        assert_eq!(bus.read(0xC123), 0x77);
        assert_eq!(bus.translate(0xFFFC), 0xBFFC);
    }

    #[test]
    fn writes_to_rom_window_are_accepted() {
        let mut bus = NesBus::new(Box::new(Nrom256));
        bus.write(0x9000, 0x42);
        assert_eq!(bus.read(0x9000), 0x42);
    }

    #[test]
    fn load_copies_prg_and_programs_reset_vector() {
        let cart = cartridge(2, 0);
        let mut bus = NesBus::load(&cart).unwrap();

        assert_eq!(bus.read(0x8000), 0x00);
        assert_eq!(bus.read(0x8005), 0x05);
        assert_eq!(bus.read(0xC001), 0x01);
        assert_eq!(bus.read_word(RESET_VECTOR), 0x8000);
        assert_eq!(bus.mapper().name(), "NROM-256");
    }

    #[test]
    fn load_single_bank_uses_mirroring_mapper() {
        let cart = cartridge(1, 0);
        let mut bus = NesBus::load(&cart).unwrap();

        assert_eq!(bus.mapper().name(), "NROM-128");
        assert_eq!(bus.read(0xC010), bus.read(0x8010));
        assert_eq!(bus.read_word(RESET_VECTOR), 0x8000);
    }

    #[test]
    fn load_rejects_unknown_mapper() {
        let cart = cartridge(1, 4);
        assert!(matches!(
            NesBus::load(&cart),
            Err(CartridgeError::UnsupportedMapper(4))
        ));
    }

    #[test]
    fn read_word_is_little_endian() {
        let mut bus = NesBus::new(Box::new(Nrom256));
        bus.write(0x0010, 0x34);
        bus.write(0x0011, 0x12);
        assert_eq!(bus.read_word(0x0010), 0x1234);
    }
}
