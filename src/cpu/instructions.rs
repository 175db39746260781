//! Instruction semantics, keyed by [`Instruction`].
//!
//! Every handler works on an already-resolved [`Operand`] and changes flags
//! only through the CPU's `test_*` helpers.

use crate::{
    bus::Bus,
    cpu::{
        cpu::{CPU, Operand},
        flags::{
            FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE,
            FLAG_OVERFLOW, FLAG_UNUSED, FLAG_ZERO,
        },
        opcodes::{Instruction, Opcode},
    },
};

impl<B: Bus> CPU<B> {
    pub(crate) fn execute(&mut self, op: &Opcode) {
        let operand = self.resolve(op);

        match op.instruction {
            Instruction::Lda => {
                self.a = self.load(operand);
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Ldx => {
                self.x = self.load(operand);
                self.update_zero_and_negative_flags(self.x);
            }
            Instruction::Ldy => {
                self.y = self.load(operand);
                self.update_zero_and_negative_flags(self.y);
            }
            Instruction::Sta => self.store(operand, self.a),
            Instruction::Stx => self.store(operand, self.x),
            Instruction::Sty => self.store(operand, self.y),

            Instruction::Adc => {
                let value = self.load(operand);
                self.adc(value);
            }
            Instruction::Sbc => {
                let value = self.load(operand);
                self.sbc(value);
            }

            Instruction::And => {
                let value = self.load(operand);
                self.a &= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Ora => {
                let value = self.load(operand);
                self.a |= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Eor => {
                let value = self.load(operand);
                self.a ^= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Bit => {
                let value = self.load(operand);
                self.test_zero(self.a & value);
                self.test_negative(value);
                if value & FLAG_OVERFLOW != 0 {
                    self.set_flag(FLAG_OVERFLOW);
                } else {
                    self.clear_flag(FLAG_OVERFLOW);
                }
            }

            Instruction::Asl => self.modify(operand, |cpu, value| {
                let wide = (value as u16) << 1;
                cpu.test_carry_on_add(wide);
                wide as u8
            }),
            Instruction::Lsr => self.modify(operand, |cpu, value| {
                cpu.test_carry_on_shift_right(value);
                value >> 1
            }),
            Instruction::Rol => self.modify(operand, |cpu, value| {
                let wide = ((value as u16) << 1) | cpu.flag(FLAG_CARRY) as u16;
                cpu.test_carry_on_add(wide);
                wide as u8
            }),
            Instruction::Ror => self.modify(operand, |cpu, value| {
                let carry_in = (cpu.flag(FLAG_CARRY) as u8) << 7;
                cpu.test_carry_on_shift_right(value);
                (value >> 1) | carry_in
            }),

            Instruction::Inc => self.modify(operand, |_, value| value.wrapping_add(1)),
            Instruction::Dec => self.modify(operand, |_, value| value.wrapping_sub(1)),
            Instruction::Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Instruction::Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative_flags(self.y);
            }
            Instruction::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Instruction::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.y);
            }

            Instruction::Cmp => {
                let value = self.load(operand);
                self.compare(self.a, value);
            }
            Instruction::Cpx => {
                let value = self.load(operand);
                self.compare(self.x, value);
            }
            Instruction::Cpy => {
                let value = self.load(operand);
                self.compare(self.y, value);
            }

            Instruction::Bcc => self.branch(!self.flag(FLAG_CARRY), operand.address()),
            Instruction::Bcs => self.branch(self.flag(FLAG_CARRY), operand.address()),
            Instruction::Bne => self.branch(!self.flag(FLAG_ZERO), operand.address()),
            Instruction::Beq => self.branch(self.flag(FLAG_ZERO), operand.address()),
            Instruction::Bpl => self.branch(!self.flag(FLAG_NEGATIVE), operand.address()),
            Instruction::Bmi => self.branch(self.flag(FLAG_NEGATIVE), operand.address()),
            Instruction::Bvc => self.branch(!self.flag(FLAG_OVERFLOW), operand.address()),
            Instruction::Bvs => self.branch(self.flag(FLAG_OVERFLOW), operand.address()),

            Instruction::Jmp => self.pc = operand.address(),
            Instruction::Jsr => {
                // Pushes the address of the JSR's last byte; RTS adds the 1 back.
                self.push_word(self.pc.wrapping_add(2));
                self.pc = operand.address();
            }
            Instruction::Rts => self.pc = self.pop_word().wrapping_add(1),
            Instruction::Brk => self.brk(),
            Instruction::Rti => {
                self.pull_status();
                self.pc = self.pop_word();
            }

            Instruction::Pha => self.push(self.a),
            Instruction::Php => self.push(self.status | FLAG_BREAK | FLAG_UNUSED),
            Instruction::Pla => {
                self.a = self.pop();
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Plp => self.pull_status(),

            Instruction::Tax => {
                self.x = self.a;
                self.update_zero_and_negative_flags(self.x);
            }
            Instruction::Tay => {
                self.y = self.a;
                self.update_zero_and_negative_flags(self.y);
            }
            Instruction::Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative_flags(self.x);
            }
            Instruction::Txa => {
                self.a = self.x;
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Txs => self.sp = self.x,
            Instruction::Tya => {
                self.a = self.y;
                self.update_zero_and_negative_flags(self.a);
            }

            Instruction::Clc => self.clear_flag(FLAG_CARRY),
            Instruction::Sec => self.set_flag(FLAG_CARRY),
            Instruction::Cli => self.clear_flag(FLAG_INTERRUPT_DISABLE),
            Instruction::Sei => self.set_flag(FLAG_INTERRUPT_DISABLE),
            Instruction::Clv => self.clear_flag(FLAG_OVERFLOW),
            Instruction::Cld => self.clear_flag(FLAG_DECIMAL),
            Instruction::Sed => self.set_flag(FLAG_DECIMAL),

            Instruction::Nop => {}
        }
    }

    fn load(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Address(addr) => self.bus.read(addr),
            Operand::Accumulator => self.a,
            Operand::Implied => 0,
        }
    }

    fn store(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Address(addr) => self.bus.write(addr, value),
            Operand::Accumulator => self.a = value,
            Operand::Implied => {}
        }
    }

    /// Read-modify-write on memory or the accumulator; Z and N follow the result.
    fn modify(&mut self, operand: Operand, f: impl FnOnce(&mut Self, u8) -> u8) {
        let value = self.load(operand);
        let result = f(self, value);
        self.store(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    fn adc(&mut self, value: u8) {
        let a = self.a;
        let sum = a as u16 + value as u16 + self.flag(FLAG_CARRY) as u16;
        let result = sum as u8;

        self.test_carry_on_add(sum);
        self.test_overflow_on_add(a, value, result);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    // A - M - (1 - C) computed as A + !M + C, so carry means "no borrow".
    fn sbc(&mut self, value: u8) {
        let a = self.a;
        let sum = a as u16 + (!value) as u16 + self.flag(FLAG_CARRY) as u16;
        let result = sum as u8;

        self.test_carry_on_add(sum);
        self.test_overflow_on_sub(a, value, result);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.test_carry_on_compare(register, value);
        self.update_zero_and_negative_flags(register.wrapping_sub(value));
    }
}
