//! PHP — push processor status with B and U both set.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    let byte = cpu.status.to_pushed_byte();
    cpu.push_u8(mem, byte)?;
    Ok(ExecOutcome::default())
}
