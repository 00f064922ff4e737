//! STY — store Y register. — store; does not touch flags.

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let addr = r.effective_addr.expect("STY always targets memory");
    mem.write_byte(addr, cpu.y)?;
    Ok(ExecOutcome::default())
}
