//! TAY — transfer A to Y.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.y = cpu.a;
    cpu.status.update_zn(cpu.y);
    Ok(ExecOutcome::default())
}
