//! INC — increment memory.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let addr = r.effective_addr.expect("INC always targets memory");
    let result = r.value.expect("INC always has a value operand").wrapping_add(1);
    mem.write_byte(addr, result)?;
    cpu.status.update_zn(result);
    Ok(ExecOutcome::default())
}
