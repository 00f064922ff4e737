//! Dispatches a decoded opcode to its instruction handler.

mod adc;
mod and;
mod asl;
mod bcc;
mod bcs;
mod beq;
mod bit;
mod bmi;
mod bne;
mod bpl;
mod brk;
mod bvc;
mod bvs;
mod clc;
mod cld;
mod cli;
mod clv;
mod cmp;
mod cpx;
mod cpy;
mod dec;
mod dex;
mod dey;
mod eor;
mod inc;
mod inx;
mod iny;
mod jmp;
mod jsr;
mod lda;
mod ldx;
mod ldy;
mod lsr;
mod nop;
mod ora;
mod pha;
mod php;
mod pla;
mod plp;
mod rol;
mod ror;
mod rti;
mod rts;
mod sbc;
mod sec;
mod sed;
mod sei;
mod sta;
mod stx;
mod sty;
mod tax;
mod tay;
mod tsx;
mod txa;
mod txs;
mod tya;

use crate::cpu::addressing::Resolved;
use crate::cpu::decoder::Mnemonic;
use crate::cpu::{Cpu, ExecOutcome};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub(crate) fn execute(
    cpu: &mut Cpu,
    mem: &mut MemoryManager,
    mnemonic: Mnemonic,
    resolved: Resolved,
) -> EngineResult<ExecOutcome> {
    match mnemonic {
        Mnemonic::ADC => adc::exec(cpu, mem, resolved),
        Mnemonic::AND => and::exec(cpu, mem, resolved),
        Mnemonic::ASL => asl::exec(cpu, mem, resolved),
        Mnemonic::BCC => bcc::exec(cpu, mem, resolved),
        Mnemonic::BCS => bcs::exec(cpu, mem, resolved),
        Mnemonic::BEQ => beq::exec(cpu, mem, resolved),
        Mnemonic::BIT => bit::exec(cpu, mem, resolved),
        Mnemonic::BMI => bmi::exec(cpu, mem, resolved),
        Mnemonic::BNE => bne::exec(cpu, mem, resolved),
        Mnemonic::BPL => bpl::exec(cpu, mem, resolved),
        Mnemonic::BRK => brk::exec(cpu, mem, resolved),
        Mnemonic::BVC => bvc::exec(cpu, mem, resolved),
        Mnemonic::BVS => bvs::exec(cpu, mem, resolved),
        Mnemonic::CLC => clc::exec(cpu, mem, resolved),
        Mnemonic::CLD => cld::exec(cpu, mem, resolved),
        Mnemonic::CLI => cli::exec(cpu, mem, resolved),
        Mnemonic::CLV => clv::exec(cpu, mem, resolved),
        Mnemonic::CMP => cmp::exec(cpu, mem, resolved),
        Mnemonic::CPX => cpx::exec(cpu, mem, resolved),
        Mnemonic::CPY => cpy::exec(cpu, mem, resolved),
        Mnemonic::DEC => dec::exec(cpu, mem, resolved),
        Mnemonic::DEX => dex::exec(cpu, mem, resolved),
        Mnemonic::DEY => dey::exec(cpu, mem, resolved),
        Mnemonic::EOR => eor::exec(cpu, mem, resolved),
        Mnemonic::INC => inc::exec(cpu, mem, resolved),
        Mnemonic::INX => inx::exec(cpu, mem, resolved),
        Mnemonic::INY => iny::exec(cpu, mem, resolved),
        Mnemonic::JMP => jmp::exec(cpu, mem, resolved),
        Mnemonic::JSR => jsr::exec(cpu, mem, resolved),
        Mnemonic::LDA => lda::exec(cpu, mem, resolved),
        Mnemonic::LDX => ldx::exec(cpu, mem, resolved),
        Mnemonic::LDY => ldy::exec(cpu, mem, resolved),
        Mnemonic::LSR => lsr::exec(cpu, mem, resolved),
        Mnemonic::NOP => nop::exec(cpu, mem, resolved),
        Mnemonic::ORA => ora::exec(cpu, mem, resolved),
        Mnemonic::PHA => pha::exec(cpu, mem, resolved),
        Mnemonic::PHP => php::exec(cpu, mem, resolved),
        Mnemonic::PLA => pla::exec(cpu, mem, resolved),
        Mnemonic::PLP => plp::exec(cpu, mem, resolved),
        Mnemonic::ROL => rol::exec(cpu, mem, resolved),
        Mnemonic::ROR => ror::exec(cpu, mem, resolved),
        Mnemonic::RTI => rti::exec(cpu, mem, resolved),
        Mnemonic::RTS => rts::exec(cpu, mem, resolved),
        Mnemonic::SBC => sbc::exec(cpu, mem, resolved),
        Mnemonic::SEC => sec::exec(cpu, mem, resolved),
        Mnemonic::SED => sed::exec(cpu, mem, resolved),
        Mnemonic::SEI => sei::exec(cpu, mem, resolved),
        Mnemonic::STA => sta::exec(cpu, mem, resolved),
        Mnemonic::STX => stx::exec(cpu, mem, resolved),
        Mnemonic::STY => sty::exec(cpu, mem, resolved),
        Mnemonic::TAX => tax::exec(cpu, mem, resolved),
        Mnemonic::TAY => tay::exec(cpu, mem, resolved),
        Mnemonic::TSX => tsx::exec(cpu, mem, resolved),
        Mnemonic::TXA => txa::exec(cpu, mem, resolved),
        Mnemonic::TXS => txs::exec(cpu, mem, resolved),
        Mnemonic::TYA => tya::exec(cpu, mem, resolved),
    }
}
