//! BEQ — branch if equal (zero set).

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let condition = cpu.status.contains(StatusFlags::ZERO);
    if !condition {
        return Ok(ExecOutcome::default());
    }
    let old_pc = cpu.pc;
    cpu.pc = r.effective_addr.expect("branch always resolves a target address");
    let page_crossed = (old_pc & 0xFF00) != (cpu.pc & 0xFF00);
    Ok(ExecOutcome {
        extra_cycles: if page_crossed { 2 } else { 1 },
        branch_taken: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_taken_reports_zero_extra_cycles() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        let outcome = exec(&mut cpu, &mut mem, Resolved { effective_addr: Some(0x0700), value: None, page_crossed: false }).unwrap();
        assert_eq!(outcome.extra_cycles, 0);
        assert!(!outcome.branch_taken);
    }

    #[test]
    fn taken_same_page_costs_one_extra_cycle() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.pc = 0x0600;
        cpu.status.set_flag(StatusFlags::ZERO, true);
        let outcome = exec(&mut cpu, &mut mem, Resolved { effective_addr: Some(0x0610), value: None, page_crossed: false }).unwrap();
        assert_eq!(outcome.extra_cycles, 1);
        assert_eq!(cpu.pc, 0x0610);
    }

    #[test]
    fn taken_crossing_page_costs_two_extra_cycles() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.pc = 0x06F0;
        cpu.status.set_flag(StatusFlags::ZERO, true);
        let outcome = exec(&mut cpu, &mut mem, Resolved { effective_addr: Some(0x0710), value: None, page_crossed: false }).unwrap();
        assert_eq!(outcome.extra_cycles, 2);
    }
}
