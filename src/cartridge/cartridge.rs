//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper, etc.), an optional
//! 512-byte trainer, then PRG ROM, then CHR ROM.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const HEADER_LEN: usize = 16;
pub const TRAINER_LEN: usize = 512;
pub const PRG_BANK_LEN: usize = 16 * 1024;
pub const CHR_BANK_LEN: usize = 8 * 1024;

const MAGIC: [u8; 4] = *b"NES\x1A";

/// Fields of the 16-byte iNES header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// PRG ROM size in 16 KiB units.
    pub prg_banks: u8,
    /// CHR ROM size in 8 KiB units (0 means the board uses CHR RAM).
    pub chr_banks: u8,
    pub flags6: u8,
    pub flags7: u8,
    pub prg_ram_size: u8,
    pub flags9: u8,
}

impl Header {
    /// Parse the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_LEN {
            return Err(CartridgeError::Truncated {
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }
        if data[0..4] != MAGIC {
            return Err(CartridgeError::BadMagic);
        }

        Ok(Self {
            prg_banks: data[4],
            chr_banks: data[5],
            flags6: data[6],
            flags7: data[7],
            prg_ram_size: data[8],
            flags9: data[9],
        })
    }

    /// Mapper number: low nibble from flags 6, high nibble from flags 7.
    pub fn mapper_number(&self) -> u8 {
        (self.flags6 >> 4) | (self.flags7 & 0xF0)
    }

    /// Flags 6 bit 2: a 512-byte trainer sits between header and PRG.
    pub fn has_trainer(&self) -> bool {
        self.flags6 & 0x04 != 0
    }

    pub fn prg_len(&self) -> usize {
        self.prg_banks as usize * PRG_BANK_LEN
    }

    pub fn chr_len(&self) -> usize {
        self.chr_banks as usize * CHR_BANK_LEN
    }

    /// File offset of the first PRG byte.
    pub fn prg_offset(&self) -> usize {
        if self.has_trainer() {
            HEADER_LEN + TRAINER_LEN
        } else {
            HEADER_LEN
        }
    }
}

/// A parsed cartridge image. PRG/CHR are copied out of the file.
#[derive(Debug, Clone)]
pub struct Cartridge {
    pub header: Header,
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
}

impl Cartridge {
    /// Load a cartridge from an iNES file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| CartridgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// Parse an in-memory iNES image.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        let header = Header::parse(data)?;

        let prg_start = header.prg_offset();
        let prg_end = prg_start + header.prg_len();
        let chr_end = prg_end + header.chr_len();
        if data.len() < chr_end {
            return Err(CartridgeError::Truncated {
                expected: chr_end,
                actual: data.len(),
            });
        }

        Ok(Self {
            header,
            prg_rom: data[prg_start..prg_end].to_vec(),
            chr_rom: data[prg_end..chr_end].to_vec(),
        })
    }
}

/// Configuration-fatal problems found before emulation starts.
#[derive(Debug)]
pub enum CartridgeError {
    Io { path: PathBuf, source: io::Error },
    /// The image is shorter than its header says it should be.
    Truncated { expected: usize, actual: usize },
    BadMagic,
    UnsupportedMapper(u8),
    /// PRG does not fit the $8000–$FFFF window.
    PrgTooLarge(usize),
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            CartridgeError::Truncated { expected, actual } => {
                write!(f, "ROM image truncated: need {} bytes, got {}", expected, actual)
            }
            CartridgeError::BadMagic => write!(f, "not an iNES image (bad magic)"),
            CartridgeError::UnsupportedMapper(n) => write!(f, "unsupported mapper {}", n),
            CartridgeError::PrgTooLarge(len) => {
                write!(f, "PRG ROM of {} bytes does not fit the 32 KiB window", len)
            }
        }
    }
}

impl std::error::Error for CartridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CartridgeError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
