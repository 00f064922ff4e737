//! INY — increment Y.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.status.update_zn(cpu.y);
    Ok(ExecOutcome::default())
}
