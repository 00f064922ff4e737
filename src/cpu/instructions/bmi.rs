//! BMI — branch if minus (negative set).

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let condition = cpu.status.contains(StatusFlags::NEGATIVE);
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
