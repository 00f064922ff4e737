//! CLV — clear overflow.

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, _mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.status.set_flag(StatusFlags::OVERFLOW, false);
    Ok(ExecOutcome::default())
}
