//! INX — increment X.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.status.update_zn(cpu.x);
    Ok(ExecOutcome::default())
}
