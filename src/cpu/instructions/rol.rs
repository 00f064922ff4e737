//! ROL — rotate left through carry (9-bit rotation).

use crate::cpu::addressing::Resolved;
use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn exec(cpu: &mut Cpu, mem: &mut MemoryManager, r: Resolved) -> EngineResult<ExecOutcome> {
    let input = r.value.expect("ROL always has a value operand");
    let carry_in = cpu.status.contains(StatusFlags::CARRY) as u8;
    let result = (input << 1) | carry_in;
    cpu.status.set_flag(StatusFlags::CARRY, input & 0x80 != 0);
    cpu.status.update_zn(result);
    match r.effective_addr {
        Some(addr) => mem.write_byte(addr, result)?,
        None => cpu.a = result,
    }
    Ok(ExecOutcome::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_carry_into_low_bit() {
        let mut mem = MemoryManager::new(false);
        let mut cpu = Cpu::new();
        cpu.status.set_flag(StatusFlags::CARRY, true);
        exec(&mut cpu, &mut mem, Resolved { effective_addr: None, value: Some(0x40), page_crossed: false }).unwrap();
        assert_eq!(cpu.a, 0x81);
        assert!(!cpu.status.contains(StatusFlags::CARRY));
    }
}
