use crate::{
    bus::{Bus, NesBus, PPU_STATUS},
    cartridge::mapper::mapper0::Nrom256,
    ppu::ppu::{DOTS_PER_SCANLINE, PPU, PRE_RENDER_SCANLINE, VBLANK_SCANLINE},
};

fn regs() -> NesBus {
    NesBus::new(Box::new(Nrom256))
}

const SCANLINE: u16 = DOTS_PER_SCANLINE;

#[test]
fn starts_at_origin() {
    let ppu = PPU::new();
    assert_eq!((ppu.scanline(), ppu.dot()), (0, 0));
    assert!(!ppu.vblank());
    assert!(!ppu.nmi_pending());
    assert_eq!(ppu.frame(), 0);
}

#[test]
fn crossing_341_increments_scanline_once() {
    let mut bus = regs();
    let mut ppu = PPU::new();

    assert!(!ppu.step(340, &mut bus));
    assert_eq!((ppu.scanline(), ppu.dot()), (0, 340));

    ppu.step(5, &mut bus);
    assert_eq!((ppu.scanline(), ppu.dot()), (1, 4));

    ppu.step(SCANLINE, &mut bus);
    assert_eq!((ppu.scanline(), ppu.dot()), (2, 4));
}

#[test]
fn vblank_starts_at_241_dot_1() {
    let mut bus = regs();
    let mut ppu = PPU::new();

    for _ in 0..VBLANK_SCANLINE {
        assert!(!ppu.step(SCANLINE, &mut bus));
    }
    assert_eq!((ppu.scanline(), ppu.dot()), (241, 0));
    assert!(!ppu.vblank());
    assert_eq!(bus.read(PPU_STATUS) & 0x80, 0);

    assert!(ppu.step(1, &mut bus));
    assert!(ppu.vblank());
    assert!(ppu.nmi_pending());
    assert_eq!(bus.read(PPU_STATUS) & 0x80, 0x80);

    // Only one NMI request per frame.
    assert!(!ppu.step(SCANLINE * 10, &mut bus));
    assert!(ppu.vblank());
}

#[test]
fn vblank_bit_keeps_other_status_bits() {
    let mut bus = regs();
    let mut ppu = PPU::new();
    bus.write(PPU_STATUS, 0x41);

    for _ in 0..VBLANK_SCANLINE {
        ppu.step(SCANLINE, &mut bus);
    }
    ppu.step(1, &mut bus);
    assert_eq!(bus.read(PPU_STATUS), 0xC1);
    assert_eq!(bus.read(0x200A), 0xC1);

    ppu.step(SCANLINE * (PRE_RENDER_SCANLINE - VBLANK_SCANLINE), &mut bus);
    assert_eq!(bus.read(PPU_STATUS), 0x41);
}

#[test]
fn pre_render_line_clears_vblank_and_wraps() {
    let mut bus = regs();
    let mut ppu = PPU::new();

    for _ in 0..VBLANK_SCANLINE {
        ppu.step(SCANLINE, &mut bus);
    }
    ppu.step(1, &mut bus);
    ppu.step(SCANLINE * (PRE_RENDER_SCANLINE - VBLANK_SCANLINE), &mut bus);

    assert_eq!((ppu.scanline(), ppu.dot()), (0, 1));
    assert!(!ppu.vblank());
    assert!(!ppu.nmi_pending());
    assert_eq!(bus.read(PPU_STATUS) & 0x80, 0);
    assert_eq!(ppu.frame(), 1);
}

#[test]
fn one_nmi_per_frame_in_cpu_sized_steps() {
    let mut bus = regs();
    let mut ppu = PPU::new();
    let mut nmis = 0;

    // 7-cycle instructions, three dots each.
    while ppu.frame() < 3 {
        if ppu.step(21, &mut bus) {
            nmis += 1;
        }
    }

    assert_eq!(nmis, 3);
}

#[test]
fn reset_zeroes_counters() {
    let mut bus = regs();
    let mut ppu = PPU::new();
    for _ in 0..=VBLANK_SCANLINE {
        ppu.step(SCANLINE, &mut bus);
    }
    assert!(ppu.nmi_pending());

    ppu.reset();

    assert_eq!((ppu.scanline(), ppu.dot()), (0, 0));
    assert!(!ppu.nmi_pending());
    assert!(!ppu.vblank());
}
