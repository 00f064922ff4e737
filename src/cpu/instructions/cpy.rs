//! CPY — compare; sets flags but never writes the register.

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let operand = r.value.expect("CPY always has a value operand");
    let reg = cpu.y;
    let result = reg.wrapping_sub(operand);
    cpu.status.set_flag(StatusFlags::CARRY, reg >= operand);
    cpu.status.set_flag(StatusFlags::ZERO, reg == operand);
    cpu.status.set_flag(StatusFlags::NEGATIVE, result & 0x80 != 0);
    Ok(ExecOutcome::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_sets_carry_and_zero() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.y = 0x10;
        exec(&mut cpu, &mut mem, Resolved { effective_addr: None, value: Some(0x10), page_crossed: false }).unwrap();
        assert!(cpu.status.contains(StatusFlags::CARRY));
        assert!(cpu.status.contains(StatusFlags::ZERO));
    }

    #[test]
    fn less_than_clears_carry() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.y = 0x05;
        exec(&mut cpu, &mut mem, Resolved { effective_addr: None, value: Some(0x10), page_crossed: false }).unwrap();
        assert!(!cpu.status.contains(StatusFlags::CARRY));
        assert!(!cpu.status.contains(StatusFlags::ZERO));
    }
}
