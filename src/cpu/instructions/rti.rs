//! RTI — return from interrupt: pulls status (forcing U, ignoring B) then PC.

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    let byte = cpu.pull_u8(mem)?;
    cpu.status = StatusFlags::from_pulled_byte(byte);
    cpu.pc = cpu.pull_u16(mem)?;
    Ok(ExecOutcome::default())
}
