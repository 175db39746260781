use std::fmt;

use log::{Level, debug, error, info, log_enabled, trace};

use crate::{
    bus::{Bus, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR},
    cpu::{
        flags::{
            FLAG_BREAK, FLAG_CARRY, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW,
            FLAG_UNUSED, FLAG_ZERO, POWER_UP_STATUS,
        },
        opcodes::{self, AddressingMode, Opcode},
    },
};

const STACK_PAGE: u16 = 0x0100;
const NMI_CYCLES: u16 = 7;

/// Where an instruction's operand lives once the addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Address(u16),
}

impl Operand {
    /// Effective address; register operands have none and yield 0.
    pub fn address(self) -> u16 {
        match self {
            Operand::Address(addr) => addr,
            Operand::Implied | Operand::Accumulator => 0,
        }
    }
}

/// Outcome of one `CPU::step`.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    /// Cycles spent by this step, NMI entry included.
    pub cycles: u16,
    pub total_cycles: u64,
    /// Address the opcode was fetched from.
    pub pc: u16,
    pub opcode: &'static Opcode,
    /// An NMI was taken before the instruction ran.
    pub nmi: bool,
}

/// The CPU cannot continue; it stays halted until `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    UnknownOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode ${:02X} at ${:04X}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for CpuError {}

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    /// Cycles executed since reset.
    pub cycles: u64,
    pub bus: B,
    nmi_pending: bool,
    fault: Option<CpuError>,
    /// Cycles charged so far by the step in progress.
    step_cycles: u16,
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: POWER_UP_STATUS,
            cycles: 0,
            bus,
            nmi_pending: false,
            fault: None,
            step_cycles: 0,
        }
    }

    pub fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
        self.status = POWER_UP_STATUS;
        self.sp = 0xFD; // resets at 0xFD instead of 0xFF for some reason

        // Silence the APU: frame counter, channel enables, then all channel registers.
        self.bus.write(0x4017, 0x00);
        self.bus.write(0x4015, 0x00);
        for addr in 0x4000..=0x400F {
            self.bus.write(addr, 0x00);
        }

        self.pc = self.bus.read_word(RESET_VECTOR);
        self.cycles = 0;
        self.nmi_pending = false;
        self.fault = None;

        info!("CPU reset, PC=${:04X}", self.pc);
    }

    /// Execute one instruction, taking a pending NMI first.
    pub fn step(&mut self) -> Result<Step, CpuError> {
        if let Some(err) = self.fault {
            return Err(err);
        }

        self.step_cycles = 0;
        let nmi = self.nmi_pending;
        if nmi {
            self.nmi_pending = false;
            self.nmi();
        }

        let pc = self.pc;
        let code = self.bus.read(pc);
        let Some(op) = opcodes::lookup(code) else {
            let err = CpuError::UnknownOpcode { opcode: code, pc };
            error!("{}", err);
            self.fault = Some(err);
            return Err(err);
        };

        if log_enabled!(Level::Trace) {
            let line = self.format_trace(pc, op);
            trace!("{}", line);
        }

        self.step_cycles += op.cycles as u16;
        self.execute(op);
        if !op.instruction.sets_pc() {
            self.pc = self.pc.wrapping_add(op.len);
        }

        let cycles = self.step_cycles;
        self.cycles += cycles as u64;
        Ok(Step {
            cycles,
            total_cycles: self.cycles,
            pc,
            opcode: op,
            nmi,
        })
    }

    /// Latch the NMI line; the interrupt is taken at the start of the next `step`.
    pub fn raise_nmi(&mut self) {
        self.nmi_pending = true;
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    pub fn halted(&self) -> bool {
        self.fault.is_some()
    }

    fn nmi(&mut self) {
        self.push_word(self.pc);
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);
        self.set_flag(FLAG_INTERRUPT_DISABLE);
        self.pc = self.bus.read_word(NMI_VECTOR);
        self.step_cycles += NMI_CYCLES;

        debug!("NMI taken, vector ${:04X}", self.pc);
    }

    /// Software interrupt: return address is PC + 2, vector at $FFFE.
    pub(crate) fn brk(&mut self) {
        self.push_word(self.pc.wrapping_add(2));
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);
        self.set_flag(FLAG_INTERRUPT_DISABLE);
        self.pc = self.bus.read_word(IRQ_VECTOR);
    }

    /// Resolve the operand of `op`, charging the page-cross cycle where due.
    pub fn resolve(&mut self, op: &Opcode) -> Operand {
        let arg = self.pc.wrapping_add(1);
        let addr = match op.mode {
            AddressingMode::Implied => return Operand::Implied,
            AddressingMode::Accumulator => return Operand::Accumulator,
            AddressingMode::Immediate => arg,
            AddressingMode::ZeroPage => self.bus.read(arg) as u16,
            AddressingMode::ZeroPageX => self.bus.read(arg).wrapping_add(self.x) as u16,
            AddressingMode::ZeroPageY => self.bus.read(arg).wrapping_add(self.y) as u16,
            AddressingMode::Absolute => self.bus.read_word(arg),
            AddressingMode::AbsoluteX => {
                let base = self.bus.read_word(arg);
                self.indexed(base, self.x, op)
            }
            AddressingMode::AbsoluteY => {
                let base = self.bus.read_word(arg);
                self.indexed(base, self.y, op)
            }
            AddressingMode::Indirect => {
                let ptr = self.bus.read_word(arg);
                // 6502 bug: the high byte never leaves the pointer's page.
                let lo = self.bus.read(ptr) as u16;
                let hi = self.bus.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF)) as u16;
                (hi << 8) | lo
            }
            AddressingMode::IndexedIndirect => {
                let zp = self.bus.read(arg).wrapping_add(self.x);
                self.read_zero_page_word(zp)
            }
            AddressingMode::IndirectIndexed => {
                let zp = self.bus.read(arg);
                let base = self.read_zero_page_word(zp);
                self.indexed(base, self.y, op)
            }
            AddressingMode::Relative => {
                let offset = self.bus.read(arg) as i8;
                self.pc.wrapping_add(op.len).wrapping_add(offset as u16)
            }
        };
        Operand::Address(addr)
    }

    fn indexed(&mut self, base: u16, index: u8, op: &Opcode) -> u16 {
        let addr = base.wrapping_add(index as u16);
        if page_crossed(base, addr) && op.instruction.pays_page_penalty() {
            self.step_cycles += 1;
        }
        addr
    }

    /// Pointer stored at `zp`, `zp + 1`, wrapping inside the zero page.
    fn read_zero_page_word(&mut self, zp: u8) -> u16 {
        let lo = self.bus.read(zp as u16) as u16;
        let hi = self.bus.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Relative branch: taken costs one extra cycle, two if it lands on another page.
    pub(crate) fn branch(&mut self, condition: bool, target: u16) {
        let next = self.pc.wrapping_add(2);
        if condition {
            self.step_cycles += if page_crossed(next, target) { 2 } else { 1 };
            self.pc = target;
        } else {
            self.pc = next;
        }
    }

    pub fn push(&mut self, value: u8) {
        let addr = STACK_PAGE | self.sp as u16;
        self.bus.write(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = STACK_PAGE | self.sp as u16;
        self.bus.read(addr)
    }

    /// High byte first, so the low byte is on top.
    pub fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    /// Pull P from the stack; B has no storage and bit 5 reads as 1.
    pub(crate) fn pull_status(&mut self) {
        self.status = (self.pop() & !FLAG_BREAK) | FLAG_UNUSED;
    }

    pub fn flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    pub fn set_flag(&mut self, flag: u8) {
        self.status |= flag;
    }

    pub fn clear_flag(&mut self, flag: u8) {
        self.status &= !flag;
    }

    fn assign_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.set_flag(flag);
        } else {
            self.clear_flag(flag);
        }
    }

    pub fn test_zero(&mut self, value: u8) {
        self.assign_flag(FLAG_ZERO, value == 0);
    }

    pub fn test_negative(&mut self, value: u8) {
        self.assign_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.test_zero(value);
        self.test_negative(value);
    }

    /// Carry out of an 8-bit add, from the untruncated sum.
    pub fn test_carry_on_add(&mut self, wide: u16) {
        self.assign_flag(FLAG_CARRY, wide > 0xFF);
    }

    /// Carry from the bit a right shift or rotate pushes out.
    pub fn test_carry_on_shift_right(&mut self, value: u8) {
        self.assign_flag(FLAG_CARRY, value & 0x01 != 0);
    }

    /// Set when `register >= value`, i.e. the subtraction did not borrow.
    pub fn test_carry_on_compare(&mut self, register: u8, value: u8) {
        self.assign_flag(FLAG_CARRY, register >= value);
    }

    /// Operands agree in sign but the result does not.
    pub fn test_overflow_on_add(&mut self, lhs: u8, rhs: u8, result: u8) {
        self.assign_flag(
            FLAG_OVERFLOW,
            (lhs ^ rhs) & 0x80 == 0 && (lhs ^ result) & 0x80 != 0,
        );
    }

    /// Operands differ in sign and the borrow-adjusted difference took the sign of `rhs`.
    pub fn test_overflow_on_sub(&mut self, lhs: u8, rhs: u8, result: u8) {
        self.assign_flag(
            FLAG_OVERFLOW,
            (lhs ^ rhs) & 0x80 != 0 && (lhs ^ result) & 0x80 != 0,
        );
    }

    /// nestest-style line for the instruction at PC, e.g.
    /// `8000  A9 42     LDA  A:00 X:00 Y:00 P:34 SP:FD CYC:0`.
    pub fn trace_line(&mut self) -> String {
        let pc = self.pc;
        let code = self.bus.read(pc);
        match opcodes::lookup(code) {
            Some(op) => self.format_trace(pc, op),
            None => format!("{:04X}  {:02X}        ???", pc, code),
        }
    }

    fn format_trace(&mut self, pc: u16, op: &Opcode) -> String {
        let bytes: Vec<String> = (0..op.len)
            .map(|i| format!("{:02X}", self.bus.read(pc.wrapping_add(i))))
            .collect();
        format!(
            "{:04X}  {:<9} {}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            bytes.join(" "),
            op.mnemonic(),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp,
            self.cycles
        )
    }
}

/// True when `a` and `b` sit on different 256-byte pages.
pub fn page_crossed(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}
