//! TYA — transfer Y to A.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.a = cpu.y;
    cpu.status.update_zn(cpu.a);
    Ok(ExecOutcome::default())
}
