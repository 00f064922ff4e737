//! DEC — decrement memory.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let addr = r.effective_addr.expect("DEC always targets memory");
    let result = r.value.expect("DEC always has a value operand").wrapping_sub(1);
    mem.write_byte(addr, result)?;
    cpu.status.update_zn(result);
    Ok(ExecOutcome::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_and_sets_negative() {
        let mut mem = MemoryManager::new(false);
        mem.write_byte(0x10, 0x00).unwrap();
        let mut cpu = Cpu::new();
        let r = Resolved { effective_addr: Some(0x10), value: Some(0x00), page_crossed: false };
        exec(&mut cpu, &mut mem, r).unwrap();
        assert_eq!(mem.read_byte(0x10).unwrap(), 0xFF);
        assert!(cpu.status.contains(crate::cpu::flags::StatusFlags::NEGATIVE));
    }
}
