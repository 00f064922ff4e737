//! 6502 CPU core and BASIC interpreter: a two-engine emulation core for a
//! 6502-era microcomputer running a line-numbered BASIC dialect.
//!
//! The [`engine::Engine`] facade owns the [`memory::MemoryManager`],
//! [`cpu::Cpu`], [`basic::Interpreter`], and [`debug::Debugger`] and wires
//! them together for a host (shell, test harness) to drive.

pub mod basic;
pub mod capabilities;
pub mod config;
pub mod cpu;
pub mod debug;
pub mod engine;
pub mod error;
pub mod memory;

pub use engine::Engine;
pub use error::{EngineError, EngineResult};
