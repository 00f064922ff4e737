//! ADC — add with carry, setting carry and signed overflow from the result.

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let operand = r.value.expect("ADC always has a value operand");
    let carry_in = cpu.status.contains(StatusFlags::CARRY) as u16;
    let sum = cpu.a as u16 + operand as u16 + carry_in;
    let result = sum as u8;

    let overflow = (cpu.a ^ result) & (operand ^ result) & 0x80 != 0;

    cpu.status.set_flag(StatusFlags::CARRY, sum > 0xFF);
    cpu.status.set_flag(StatusFlags::OVERFLOW, overflow);
    cpu.status.update_zn(result);
    cpu.a = result;
    Ok(ExecOutcome::default())
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
    fn positive_plus_positive_overflows_to_negative() {
        let cpu = run(0x50, 0x50, false);
        assert_eq!(cpu.a, 0xA0);
        assert!(!cpu.status.contains(StatusFlags::CARRY));
        assert!(cpu.status.contains(StatusFlags::OVERFLOW));
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn carry_out_on_unsigned_wrap() {
        let cpu = run(0xFF, 0x01, false);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.status.contains(StatusFlags::CARRY));
        assert!(cpu.status.contains(StatusFlags::ZERO));
        assert!(!cpu.status.contains(StatusFlags::OVERFLOW));
    }

    #[test]
    fn carry_in_is_added() {
        let cpu = run(0x01, 0x01, true);
        assert_eq!(cpu.a, 0x03);
    }
}
