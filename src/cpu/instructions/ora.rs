//! ORA — bitwise OR with the accumulator.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.a |= r.value.expect("ORA always has a value operand");
    cpu.status.update_zn(cpu.a);
    Ok(ExecOutcome::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_bits() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.a = 0b0100;
        exec(&mut cpu, &mut mem, Resolved { effective_addr: None, value: Some(0b0010), page_crossed: false }).unwrap();
        assert_eq!(cpu.a, 0b0110);
    }
}
