//! BRK — software interrupt: pushes `PC+1` and P with B set, sets I, loads
//! the IRQ/BRK vector at `$FFFE`.

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

const BRK_VECTOR: u16 = 0xFFFE;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, _r: Resolved) -> EngineResult<ExecOutcome> {
    cpu.push_u16(mem, cpu.pc)?;
    let byte = cpu.status.to_pushed_byte();
    cpu.push_u8(mem, byte)?;
    cpu.status.set_flag(StatusFlags::INTERRUPT, true);
    cpu.pc = mem.read_word(BRK_VECTOR)?;
    Ok(ExecOutcome::default())
}
