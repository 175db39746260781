use crate::cartridge::{
    cartridge::{Cartridge, CartridgeError, Header, HEADER_LEN, TRAINER_LEN},
    mapper::for_header,
};

fn ines(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
    let mut rom = vec![b'N', b'E', b'S', 0x1A, prg_banks, chr_banks, flags6, flags7];
    rom.resize(HEADER_LEN, 0);
    if flags6 & 0x04 != 0 {
        rom.extend(std::iter::repeat(0xEE).take(TRAINER_LEN));
    }
    rom.extend(std::iter::repeat(0xAA).take(prg_banks as usize * 0x4000));
    rom.extend(std::iter::repeat(0xCC).take(chr_banks as usize * 0x2000));
    rom
}

#[test]
fn parses_header_fields() {
    let mut rom = ines(2, 1, 0x10, 0x20);
    rom[8] = 3;
    rom[9] = 1;
    let header = Header::parse(&rom).unwrap();

    assert_eq!(header.prg_banks, 2);
    assert_eq!(header.chr_banks, 1);
    assert_eq!(header.prg_ram_size, 3);
    assert_eq!(header.flags9, 1);
    assert_eq!(header.mapper_number(), 0x21);
    assert!(!header.has_trainer());
}

#[test]
fn splits_prg_and_chr() {
    let cart = Cartridge::from_bytes(&ines(1, 1, 0, 0)).unwrap();

    assert_eq!(cart.prg_rom.len(), 0x4000);
    assert_eq!(cart.chr_rom.len(), 0x2000);
    assert!(cart.prg_rom.iter().all(|&b| b == 0xAA));
    assert!(cart.chr_rom.iter().all(|&b| b == 0xCC));
}

#[test]
fn skips_trainer() {
    let cart = Cartridge::from_bytes(&ines(1, 0, 0x04, 0)).unwrap();

    assert!(cart.header.has_trainer());
    assert_eq!(cart.header.prg_offset(), HEADER_LEN + TRAINER_LEN);
    assert!(cart.prg_rom.iter().all(|&b| b == 0xAA));
    assert!(cart.chr_rom.is_empty());
}

#[test]
fn rejects_bad_magic() {
    let mut rom = ines(1, 0, 0, 0);
    rom[3] = 0;
    assert!(matches!(
        Cartridge::from_bytes(&rom),
        Err(CartridgeError::BadMagic)
    ));
}

#[test]
fn rejects_truncated_image() {
    let mut rom = ines(2, 0, 0, 0);
    rom.truncate(HEADER_LEN + 100);

    match Cartridge::from_bytes(&rom) {
        Err(CartridgeError::Truncated { expected, actual }) => {
            assert_eq!(expected, HEADER_LEN + 0x8000);
            assert_eq!(actual, HEADER_LEN + 100);
        }
        other => panic!("expected truncation error, got {:?}", other),
    }

    assert!(matches!(
        Header::parse(&rom[..4]),
        Err(CartridgeError::Truncated { .. })
    ));
}

#[test]
fn selects_nrom_by_bank_count() {
    let one = Header::parse(&ines(1, 0, 0, 0)).unwrap();
    let two = Header::parse(&ines(2, 0, 0, 0)).unwrap();

    assert_eq!(for_header(&one).unwrap().name(), "NROM-128");
    assert_eq!(for_header(&two).unwrap().name(), "NROM-256");
}

#[test]
fn unsupported_mapper_is_a_load_error() {
    let header = Header::parse(&ines(1, 0, 0x10, 0)).unwrap();
    let err = for_header(&header).err().unwrap();

    assert!(matches!(err, CartridgeError::UnsupportedMapper(1)));
    assert_eq!(err.to_string(), "unsupported mapper 1");
}

#[test]
fn missing_file_reports_path() {
    let err = Cartridge::load("/nonexistent/game.nes").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/game.nes"));
    assert!(std::error::Error::source(&err).is_some());
}
