//! The 6502 status register `P`: `N V U B D I Z C` from bit 7 to bit 0.

use bitflags::bitflags;

bitflags! {
    pub struct StatusFlags: u8 {
        const CARRY      = 1 << 0;
        const ZERO       = 1 << 1;
        const INTERRUPT  = 1 << 2;
        const DECIMAL    = 1 << 3;
        const BREAK      = 1 << 4;
        const UNUSED     = 1 << 5;
        const OVERFLOW   = 1 << 6;
        const NEGATIVE   = 1 << 7;
    }
}

impl StatusFlags {
    /// State after RESET: `I=1, U=1`, everything else clear.
    pub fn after_reset() -> Self {
        StatusFlags::INTERRUPT | StatusFlags::UNUSED
    }

    pub fn set_flag(&mut self, flag: StatusFlags, value: bool) {
        self.set(flag, value);
    }

    /// Sets Z/N from a byte the way loads and ALU instructions do (not
    /// stores, not TXS).
    pub fn update_zn(&mut self, value: u8) {
        self.set(StatusFlags::ZERO, value == 0);
        self.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    /// The byte pushed by PHP / on BRK / IRQ / NMI entry: B and U both set.
    pub fn to_pushed_byte(self) -> u8 {
        (self | StatusFlags::BREAK | StatusFlags::UNUSED).bits()
    }

    /// The byte pushed on hardware-interrupt entry (NMI/IRQ, not BRK): B
    /// clear, U set.
    pub fn to_interrupt_pushed_byte(self) -> u8 {
        ((self | StatusFlags::UNUSED) & !StatusFlags::BREAK).bits()
    }

    /// PLP / RTI: load from a byte but force U set and ignore the incoming
    /// B bit (it never reflects real CPU state).
    pub fn from_pulled_byte(byte: u8) -> Self {
        (StatusFlags::from_bits_truncate(byte) | StatusFlags::UNUSED) & !StatusFlags::BREAK
    }
}
