//! SBC — subtract with carry (borrow), implemented as `ADC(!operand)`
//! under two's complement.

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let operand = r.value.expect("SBC always has a value operand");
    let inverted = Resolved { value: Some(!operand), ..r };
    super::adc::exec(cpu, mem, inverted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(a: u8, operand: u8, carry_in: bool) -> Cpu {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.a = a;
        cpu.status.set_flag(StatusFlags::CARRY, carry_in);
        exec(&mut cpu, &mut mem, Resolved { effective_addr: None, value: Some(operand), page_crossed: false }).unwrap();
        cpu
    }

    #[test]
    fn no_borrow_when_carry_set() {
        let cpu = run(0x50, 0x30, true);
        assert_eq!(cpu.a, 0x20);
        assert!(cpu.status.contains(StatusFlags::CARRY));
    }

    #[test]
    fn borrow_when_carry_clear() {
        let cpu = run(0x50, 0x30, false);
        assert_eq!(cpu.a, 0x1F);
        assert!(cpu.status.contains(StatusFlags::CARRY));
    }

    #[test]
    fn underflow_clears_carry() {
        let cpu = run(0x00, 0x01, true);
        assert_eq!(cpu.a, 0xFF);
        assert!(!cpu.status.contains(StatusFlags::CARRY));
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
    }
}
