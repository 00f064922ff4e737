//! PLA — pull accumulator.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.a = cpu.pull_u8(mem)?;
    cpu.status.update_zn(cpu.a);
    Ok(ExecOutcome::default())
}
