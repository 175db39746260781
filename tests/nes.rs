use nesdot::{
    bus::{Bus, NMI_VECTOR, PPU_STATUS, RESET_VECTOR},
    cartridge::cartridge::{Cartridge, CartridgeError},
    cpu::{cpu::CpuError, flags::FLAG_INTERRUPT_DISABLE},
    nes::Nes,
};

const PRG_BANK: usize = 0x4000;

/// iNES image with `prg_banks` banks of zeroed PRG, `code` placed at $8000
/// and the NMI vector pointing at `nmi`.
fn rom(prg_banks: u8, mapper: u8, code: &[u8], nmi: u16) -> Vec<u8> {
    let mut image = vec![b'N', b'E', b'S', 0x1A, prg_banks, 0, mapper << 4, 0];
    image.resize(16, 0);

    let mut prg = vec![0u8; prg_banks as usize * PRG_BANK];
    prg[..code.len()].copy_from_slice(code);
    let vector = prg.len() - 6;
    prg[vector..vector + 2].copy_from_slice(&nmi.to_le_bytes());

    image.extend(prg);
    image
}

fn console(image: &[u8]) -> Nes {
    let cart = Cartridge::from_bytes(image).unwrap();
    let mut nes = Nes::new(&cart).unwrap();
    nes.reset();
    nes
}

#[test]
fn sei_then_cli_from_reset_vector() {
    let mut nes = console(&rom(2, 0, &[0x78, 0x58], 0x8000));
    assert_eq!(nes.cpu.pc, 0x8000);
    assert_eq!(nes.bus().read_word(RESET_VECTOR), 0x8000);

    nes.cpu.status &= !FLAG_INTERRUPT_DISABLE;
    nes.step().unwrap();
    assert!(nes.cpu.flag(FLAG_INTERRUPT_DISABLE));
    assert_eq!(nes.cpu.pc, 0x8001);

    nes.step().unwrap();
    assert!(!nes.cpu.flag(FLAG_INTERRUPT_DISABLE));
    assert_eq!(nes.cpu.pc, 0x8002);

    // 2 cycles each, three dots per cycle.
    assert_eq!(nes.ppu.dot(), 12);
}

/// Main loop spins on `JMP $8000`; the NMI handler counts in X and returns.
fn spinning(prg_banks: u8) -> Nes {
    let mut code = vec![0x4C, 0x00, 0x80]; // JMP $8000
    code.resize(0x1000, 0);
    code.extend([0xE8, 0x40]); // $9000: INX; RTI
    console(&rom(prg_banks, 0, &code, 0x9000))
}

#[test]
fn vblank_raises_one_nmi_per_frame() {
    let mut nes = spinning(1);
    assert_eq!(nes.bus().read_word(NMI_VECTOR), 0x9000);

    let step = loop {
        let step = nes.step().unwrap();
        if step.nmi {
            break step;
        }
    };

    assert_eq!(step.pc, 0x9000);
    assert_eq!(nes.ppu.scanline(), 241);
    assert!(nes.ppu.vblank());
    assert_eq!(nes.bus().read(PPU_STATUS) & 0x80, 0x80);
    assert_eq!(nes.cpu.x, 1);

    nes.run_frame().unwrap();
    assert_eq!(nes.frame(), 1);
    assert!(!nes.ppu.vblank());
    assert_eq!(nes.bus().read(PPU_STATUS) & 0x80, 0);

    nes.run_frames(3).unwrap();
    assert_eq!(nes.frame(), 4);
    assert_eq!(nes.cpu.x, 4);
}

#[test]
fn frame_costs_about_29667_cpu_cycles() {
    let mut nes = spinning(2);
    nes.run_frame().unwrap();

    let cycles = nes.run_frame().unwrap();
    assert!((29_660..29_680).contains(&cycles), "{} cycles", cycles);
}

#[test]
fn unknown_opcode_stops_the_frame() {
    let mut nes = console(&rom(1, 0, &[0xEA, 0x02], 0x8000));

    let err = nes.run_frame().unwrap_err();
    assert_eq!(err, CpuError::UnknownOpcode { opcode: 0x02, pc: 0x8001 });
    assert!(nes.cpu.halted());
    assert_eq!(nes.step().unwrap_err(), err);
}

#[test]
fn unsupported_mapper_fails_at_load() {
    let cart = Cartridge::from_bytes(&rom(1, 4, &[], 0x8000)).unwrap();
    assert!(matches!(
        Nes::new(&cart),
        Err(CartridgeError::UnsupportedMapper(4))
    ));
}
