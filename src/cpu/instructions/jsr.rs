//! JSR — jump to subroutine; pushes the return address minus one (i.e. the
//! address of the instruction's last operand byte).

use crate::cpu::addressing::Resolved;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let target = r.effective_addr.expect("JSR always resolves a target address");
    let return_addr_minus_one = cpu.pc.wrapping_sub(1);
    cpu.push_u16(mem, return_addr_minus_one)?;
    cpu.pc = target;
    Ok(ExecOutcome::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_return_address_minus_one() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.pc = 0x0603; // PC already advanced past the 2-byte operand.
        exec(&mut cpu, &mut mem, Resolved { effective_addr: Some(0x0700), value: None, page_crossed: false }).unwrap();
        assert_eq!(cpu.pc, 0x0700);
        assert_eq!(cpu.pull_u16(&mut mem).unwrap(), 0x0602);
    }
}
