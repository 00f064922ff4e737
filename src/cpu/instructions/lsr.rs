//! LSR — logical shift right; carry receives the bit shifted out.

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let input = r.value.expect("LSR always has a value operand");
    let result = input >> 1;
    cpu.status.set_flag(StatusFlags::CARRY, input & 0x01 != 0);
    cpu.status.update_zn(result);
    match r.effective_addr {
        Some(addr) => mem.write_byte(addr, result)?,
        None => cpu.a = result,
    }
    Ok(ExecOutcome::default())
}
