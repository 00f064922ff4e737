//! LDY — load Y register.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.y = r.value.expect("LDY always has a value operand");
    cpu.status.update_zn(cpu.y);
    Ok(ExecOutcome::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::flags::StatusFlags;

    #[test]
    fn loads_and_sets_zero_flag() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        exec(&mut cpu, &mut mem, Resolved { effective_addr: None, value: Some(0x00), page_crossed: false }).unwrap();
        assert_eq!(cpu.y, 0x00);
        assert!(cpu.status.contains(StatusFlags::ZERO));
    }

    #[test]
    fn loads_and_sets_negative_flag() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        exec(&mut cpu, &mut mem, Resolved { effective_addr: None, value: Some(0x80), page_crossed: false }).unwrap();
        assert_eq!(cpu.y, 0x80);
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
    }
}
