//! BIT — test bits: Z from A & operand, N/V copied from operand bits 7/6.

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let operand = r.value.expect("BIT always has a value operand");
    cpu.status.set_flag(StatusFlags::ZERO, cpu.a & operand == 0);
    cpu.status.set_flag(StatusFlags::OVERFLOW, operand & 0x40 != 0);
    cpu.status.set_flag(StatusFlags::NEGATIVE, operand & 0x80 != 0);
    Ok(ExecOutcome::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_bits_6_and_7_from_operand() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.a = 0x01;
        exec(&mut cpu, &mut mem, Resolved { effective_addr: None, value: Some(0xC0), page_crossed: false }).unwrap();
        assert!(cpu.status.contains(StatusFlags::ZERO));
        assert!(cpu.status.contains(StatusFlags::OVERFLOW));
        assert!(cpu.status.contains(StatusFlags::NEGATIVE));
    }
}
