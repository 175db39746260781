//! 6502 processor status register (P) flag bits.

pub const FLAG_CARRY: u8 = 1 << 0;
pub const FLAG_ZERO: u8 = 1 << 1;
pub const FLAG_INTERRUPT_DISABLE: u8 = 1 << 2;
pub const FLAG_DECIMAL: u8 = 1 << 3;  // Settable, but the 2A03 has no BCD adder
pub const FLAG_BREAK: u8 = 1 << 4;    // Only meaningful in a pushed copy of P
pub const FLAG_UNUSED: u8 = 1 << 5;   // Always 1 when read on 6502
pub const FLAG_OVERFLOW: u8 = 1 << 6;
pub const FLAG_NEGATIVE: u8 = 1 << 7;

/// Status after `reset`: interrupt-disable, break and unused set.
pub const POWER_UP_STATUS: u8 = 0x34;

/// Render P as `NV-BDIZC`, upper case for set bits.
pub fn describe(status: u8) -> String {
    const NAMES: [char; 8] = ['c', 'z', 'i', 'd', 'b', '-', 'v', 'n'];
    (0..8)
        .rev()
        .map(|bit| {
            let name = NAMES[bit];
            if status & (1 << bit) != 0 {
                name.to_ascii_uppercase()
            } else {
                name
            }
        })
        .collect()
}
