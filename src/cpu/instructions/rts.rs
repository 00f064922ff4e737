//! RTS — return from subroutine; pulls two bytes and adds one.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    let addr = cpu.pull_u16(mem)?;
    cpu.pc = addr.wrapping_add(1);
    Ok(ExecOutcome::default())
}
