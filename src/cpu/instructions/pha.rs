//! PHA — push accumulator.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.push_u8(mem, cpu.a)?;
    Ok(ExecOutcome::default())
}
