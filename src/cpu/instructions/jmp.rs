//! JMP — unconditional jump. `r.effective_addr` already carries the
//! 6502 indirect-JMP page-boundary bug applied by the addressing unit.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.pc = r.effective_addr.expect("JMP always resolves a target address");
    Ok(ExecOutcome::default())
}
