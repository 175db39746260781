//! Opcode table: one descriptor per documented 6502 opcode byte.
//!
//! The table is a `static` built by a `const fn`, so it exists before the first
//! instruction runs and can never be mutated. Adding an opcode is a single
//! `op(...)` line in [`build_table`].

use std::fmt;

/// How an instruction's operand bytes become an effective address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// JMP only; reproduces the page-wrap bug.
    Indirect,
    /// (zp,X)
    IndexedIndirect,
    /// (zp),Y
    IndirectIndexed,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Instruction semantics, one variant per mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Instruction {
    pub const fn mnemonic(self) -> &'static str {
        use Instruction::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA",
        }
    }

    /// Instructions that leave PC where their semantics put it.
    pub const fn sets_pc(self) -> bool {
        use Instruction::*;
        matches!(
            self,
            Brk | Rti | Rts | Jsr | Jmp | Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs
        )
    }

    /// Stores and read-modify-write ops always spend the index fix-up cycle,
    /// which is already part of their base cost.
    pub const fn pays_page_penalty(self) -> bool {
        use Instruction::*;
        !matches!(self, Sta | Stx | Sty | Asl | Lsr | Rol | Ror | Inc | Dec)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Decoded form of one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub code: u8,
    pub instruction: Instruction,
    pub mode: AddressingMode,
    /// Length in bytes, opcode included.
    pub len: u16,
    /// Cycles before page-cross and branch adjustments.
    pub cycles: u8,
}

impl Opcode {
    pub const fn mnemonic(&self) -> &'static str {
        self.instruction.mnemonic()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${:02X}, {:?})", self.mnemonic(), self.code, self.mode)
    }
}

/// The process-wide opcode table, indexed by opcode byte.
pub static OPCODES: [Option<Opcode>; 256] = build_table();

/// Descriptor for `code`, or `None` if the byte is not a documented opcode.
pub fn lookup(code: u8) -> Option<&'static Opcode> {
    OPCODES[code as usize].as_ref()
}

const fn build_table() -> [Option<Opcode>; 256] {
    use AddressingMode::*;
    use Instruction::*;

    let mut t: [Option<Opcode>; 256] = [None; 256];

    // Load / store
    op(&mut t, 0xA9, Lda, Immediate, 2);
    op(&mut t, 0xA5, Lda, ZeroPage, 3);
    op(&mut t, 0xB5, Lda, ZeroPageX, 4);
    op(&mut t, 0xAD, Lda, Absolute, 4);
    op(&mut t, 0xBD, Lda, AbsoluteX, 4);
    op(&mut t, 0xB9, Lda, AbsoluteY, 4);
    op(&mut t, 0xA1, Lda, IndexedIndirect, 6);
    op(&mut t, 0xB1, Lda, IndirectIndexed, 5);

    op(&mut t, 0xA2, Ldx, Immediate, 2);
    op(&mut t, 0xA6, Ldx, ZeroPage, 3);
    op(&mut t, 0xB6, Ldx, ZeroPageY, 4);
    op(&mut t, 0xAE, Ldx, Absolute, 4);
    op(&mut t, 0xBE, Ldx, AbsoluteY, 4);

    op(&mut t, 0xA0, Ldy, Immediate, 2);
    op(&mut t, 0xA4, Ldy, ZeroPage, 3);
    op(&mut t, 0xB4, Ldy, ZeroPageX, 4);
    op(&mut t, 0xAC, Ldy, Absolute, 4);
    op(&mut t, 0xBC, Ldy, AbsoluteX, 4);

    op(&mut t, 0x85, Sta, ZeroPage, 3);
    op(&mut t, 0x95, Sta, ZeroPageX, 4);
    op(&mut t, 0x8D, Sta, Absolute, 4);
    op(&mut t, 0x9D, Sta, AbsoluteX, 5);
    op(&mut t, 0x99, Sta, AbsoluteY, 5);
    op(&mut t, 0x81, Sta, IndexedIndirect, 6);
    op(&mut t, 0x91, Sta, IndirectIndexed, 6);

    op(&mut t, 0x86, Stx, ZeroPage, 3);
    op(&mut t, 0x96, Stx, ZeroPageY, 4);
    op(&mut t, 0x8E, Stx, Absolute, 4);

    op(&mut t, 0x84, Sty, ZeroPage, 3);
    op(&mut t, 0x94, Sty, ZeroPageX, 4);
    op(&mut t, 0x8C, Sty, Absolute, 4);

    // Arithmetic
    op(&mut t, 0x69, Adc, Immediate, 2);
    op(&mut t, 0x65, Adc, ZeroPage, 3);
    op(&mut t, 0x75, Adc, ZeroPageX, 4);
    op(&mut t, 0x6D, Adc, Absolute, 4);
    op(&mut t, 0x7D, Adc, AbsoluteX, 4);
    op(&mut t, 0x79, Adc, AbsoluteY, 4);
    op(&mut t, 0x61, Adc, IndexedIndirect, 6);
    op(&mut t, 0x71, Adc, IndirectIndexed, 5);

    op(&mut t, 0xE9, Sbc, Immediate, 2);
    op(&mut t, 0xE5, Sbc, ZeroPage, 3);
    op(&mut t, 0xF5, Sbc, ZeroPageX, 4);
    op(&mut t, 0xED, Sbc, Absolute, 4);
    op(&mut t, 0xFD, Sbc, AbsoluteX, 4);
    op(&mut t, 0xF9, Sbc, AbsoluteY, 4);
    op(&mut t, 0xE1, Sbc, IndexedIndirect, 6);
    op(&mut t, 0xF1, Sbc, IndirectIndexed, 5);

    // Logical
    op(&mut t, 0x29, And, Immediate, 2);
    op(&mut t, 0x25, And, ZeroPage, 3);
    op(&mut t, 0x35, And, ZeroPageX, 4);
    op(&mut t, 0x2D, And, Absolute, 4);
    op(&mut t, 0x3D, And, AbsoluteX, 4);
    op(&mut t, 0x39, And, AbsoluteY, 4);
    op(&mut t, 0x21, And, IndexedIndirect, 6);
    op(&mut t, 0x31, And, IndirectIndexed, 5);

    op(&mut t, 0x09, Ora, Immediate, 2);
    op(&mut t, 0x05, Ora, ZeroPage, 3);
    op(&mut t, 0x15, Ora, ZeroPageX, 4);
    op(&mut t, 0x0D, Ora, Absolute, 4);
    op(&mut t, 0x1D, Ora, AbsoluteX, 4);
    op(&mut t, 0x19, Ora, AbsoluteY, 4);
    op(&mut t, 0x01, Ora, IndexedIndirect, 6);
    op(&mut t, 0x11, Ora, IndirectIndexed, 5);

    op(&mut t, 0x49, Eor, Immediate, 2);
    op(&mut t, 0x45, Eor, ZeroPage, 3);
    op(&mut t, 0x55, Eor, ZeroPageX, 4);
    op(&mut t, 0x4D, Eor, Absolute, 4);
    op(&mut t, 0x5D, Eor, AbsoluteX, 4);
    op(&mut t, 0x59, Eor, AbsoluteY, 4);
    op(&mut t, 0x41, Eor, IndexedIndirect, 6);
    op(&mut t, 0x51, Eor, IndirectIndexed, 5);

    op(&mut t, 0x24, Bit, ZeroPage, 3);
    op(&mut t, 0x2C, Bit, Absolute, 4);

    // Shifts and rotates
    op(&mut t, 0x0A, Asl, Accumulator, 2);
    op(&mut t, 0x06, Asl, ZeroPage, 5);
    op(&mut t, 0x16, Asl, ZeroPageX, 6);
    op(&mut t, 0x0E, Asl, Absolute, 6);
    op(&mut t, 0x1E, Asl, AbsoluteX, 7);

    op(&mut t, 0x4A, Lsr, Accumulator, 2);
    op(&mut t, 0x46, Lsr, ZeroPage, 5);
    op(&mut t, 0x56, Lsr, ZeroPageX, 6);
    op(&mut t, 0x4E, Lsr, Absolute, 6);
    op(&mut t, 0x5E, Lsr, AbsoluteX, 7);

    op(&mut t, 0x2A, Rol, Accumulator, 2);
    op(&mut t, 0x26, Rol, ZeroPage, 5);
    op(&mut t, 0x36, Rol, ZeroPageX, 6);
    op(&mut t, 0x2E, Rol, Absolute, 6);
    op(&mut t, 0x3E, Rol, AbsoluteX, 7);

    op(&mut t, 0x6A, Ror, Accumulator, 2);
    op(&mut t, 0x66, Ror, ZeroPage, 5);
    op(&mut t, 0x76, Ror, ZeroPageX, 6);
    op(&mut t, 0x6E, Ror, Absolute, 6);
    op(&mut t, 0x7E, Ror, AbsoluteX, 7);

    // Increment / decrement
    op(&mut t, 0xE6, Inc, ZeroPage, 5);
    op(&mut t, 0xF6, Inc, ZeroPageX, 6);
    op(&mut t, 0xEE, Inc, Absolute, 6);
    op(&mut t, 0xFE, Inc, AbsoluteX, 7);

    op(&mut t, 0xC6, Dec, ZeroPage, 5);
    op(&mut t, 0xD6, Dec, ZeroPageX, 6);
    op(&mut t, 0xCE, Dec, Absolute, 6);
    op(&mut t, 0xDE, Dec, AbsoluteX, 7);

    op(&mut t, 0xE8, Inx, Implied, 2);
    op(&mut t, 0xC8, Iny, Implied, 2);
    op(&mut t, 0xCA, Dex, Implied, 2);
    op(&mut t, 0x88, Dey, Implied, 2);

    // Compare
    op(&mut t, 0xC9, Cmp, Immediate, 2);
    op(&mut t, 0xC5, Cmp, ZeroPage, 3);
    op(&mut t, 0xD5, Cmp, ZeroPageX, 4);
    op(&mut t, 0xCD, Cmp, Absolute, 4);
    op(&mut t, 0xDD, Cmp, AbsoluteX, 4);
    op(&mut t, 0xD9, Cmp, AbsoluteY, 4);
    op(&mut t, 0xC1, Cmp, IndexedIndirect, 6);
    op(&mut t, 0xD1, Cmp, IndirectIndexed, 5);

    op(&mut t, 0xE0, Cpx, Immediate, 2);
    op(&mut t, 0xE4, Cpx, ZeroPage, 3);
    op(&mut t, 0xEC, Cpx, Absolute, 4);

    op(&mut t, 0xC0, Cpy, Immediate, 2);
    op(&mut t, 0xC4, Cpy, ZeroPage, 3);
    op(&mut t, 0xCC, Cpy, Absolute, 4);

    // Branches: base cost is the not-taken timing
    op(&mut t, 0x90, Bcc, Relative, 2);
    op(&mut t, 0xB0, Bcs, Relative, 2);
    op(&mut t, 0xF0, Beq, Relative, 2);
    op(&mut t, 0x30, Bmi, Relative, 2);
    op(&mut t, 0xD0, Bne, Relative, 2);
    op(&mut t, 0x10, Bpl, Relative, 2);
    op(&mut t, 0x50, Bvc, Relative, 2);
    op(&mut t, 0x70, Bvs, Relative, 2);

    // Jumps, calls, interrupts
    op(&mut t, 0x4C, Jmp, Absolute, 3);
    op(&mut t, 0x6C, Jmp, Indirect, 5);
    op(&mut t, 0x20, Jsr, Absolute, 6);
    op(&mut t, 0x60, Rts, Implied, 6);
    op(&mut t, 0x00, Brk, Implied, 7);
    op(&mut t, 0x40, Rti, Implied, 6);

    // Stack
    op(&mut t, 0x48, Pha, Implied, 3);
    op(&mut t, 0x08, Php, Implied, 3);
    op(&mut t, 0x68, Pla, Implied, 4);
    op(&mut t, 0x28, Plp, Implied, 4);

    // Transfers
    op(&mut t, 0xAA, Tax, Implied, 2);
    op(&mut t, 0xA8, Tay, Implied, 2);
    op(&mut t, 0xBA, Tsx, Implied, 2);
    op(&mut t, 0x8A, Txa, Implied, 2);
    op(&mut t, 0x9A, Txs, Implied, 2);
    op(&mut t, 0x98, Tya, Implied, 2);

    // Flags
    op(&mut t, 0x18, Clc, Implied, 2);
    op(&mut t, 0x38, Sec, Implied, 2);
    op(&mut t, 0x58, Cli, Implied, 2);
    op(&mut t, 0x78, Sei, Implied, 2);
    op(&mut t, 0xB8, Clv, Implied, 2);
    op(&mut t, 0xD8, Cld, Implied, 2);
    op(&mut t, 0xF8, Sed, Implied, 2);

    op(&mut t, 0xEA, Nop, Implied, 2);

    t
}

const fn op(
    table: &mut [Option<Opcode>; 256],
    code: u8,
    instruction: Instruction,
    mode: AddressingMode,
    cycles: u8,
) {
    table[code as usize] = Some(Opcode {
        code,
        instruction,
        mode,
        len: 1 + mode.operand_len(),
        cycles,
    });
}
