//! The top-level facade: owns the Memory Manager, CPU core, BASIC
//! interpreter, and debugger, and wires them together without any of them
//! holding a reference back to this struct or to each other. Everything
//! that needs cross-component access (the `SYS` bridge, debug probes) goes
//! through `&mut` parameters passed down from here, never shared ownership.

use crate::basic::{self, Interpreter, Program};
use crate::capabilities::{InputSource, OutputSink};
use crate::config::EngineConfig;
use crate::cpu::Cpu;
use crate::debug::{DebugEvent, Debugger, Location};
use crate::error::EngineResult;
use crate::memory::MemoryManager;

pub struct Engine {
    pub mem: MemoryManager,
    pub cpu: Cpu,
    pub interpreter: Interpreter,
    pub debugger: Debugger,
    observers: Vec<Box<dyn FnMut(&EngineEvent)>>,
}

/// Events the engine broadcasts to its observer registry, per the ordering
/// guarantee that effects within a step become visible before the next step
/// begins.
pub enum EngineEvent<'a> {
    BasicStepped { line: Option<u32> },
    CpuStepped { cycles: u64 },
    Debug(&'a DebugEvent),
}

impl Engine {
    pub fn new(config: EngineConfig, output: Box<dyn OutputSink>, input: Box<dyn InputSource>) -> Self {
        let mem = MemoryManager::new(config.protect_interrupt_vectors);
        let cpu = Cpu::new();
        let interpreter = Interpreter::new(Program::new(), &config, output, input);
        let debugger = Debugger::new(config.trace_capacity);
        Self {
            mem,
            cpu,
            interpreter,
            debugger,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn FnMut(&EngineEvent)>) {
        self.observers.push(observer);
    }

    fn notify(&mut self, event: EngineEvent) {
        for obs in &mut self.observers {
            obs(&event);
        }
    }

    /// Tokenizes, parses, and loads a BASIC program, replacing whatever was
    /// previously loaded.
    pub fn load(&mut self, source: &str) -> EngineResult<()> {
        let program = basic::parse_program(source)?;
        self.interpreter.load_program(program);
        Ok(())
    }

    /// Executes one BASIC statement, checking the breakpoint table against
    /// the current line both before and after.
    pub fn step_basic(&mut self) -> EngineResult<bool> {
        if let Some(line) = self.interpreter.current_line() {
            if let Some(event) = self.debugger.on_step(Location::Line(line), true) {
                self.notify(EngineEvent::Debug(&event));
                return Ok(false);
            }
        }
        let advanced = self.interpreter.step(&mut self.mem, &mut self.cpu)?;
        let line = self.interpreter.current_line();
        self.notify(EngineEvent::BasicStepped { line });
        Ok(advanced)
    }

    pub fn run_basic(&mut self, max_statements: u64) -> EngineResult<u64> {
        let mut executed = 0u64;
        while executed < max_statements && !self.interpreter.is_halted() && !self.debugger.is_paused() {
            if !self.step_basic()? {
                break;
            }
            executed += 1;
        }
        Ok(executed)
    }

    pub fn reset_cpu(&mut self) -> EngineResult<()> {
        self.cpu.reset(&mut self.mem)
    }

    pub fn step_cpu(&mut self) -> EngineResult<u64> {
        let cycles = self.cpu.step(&mut self.mem)?;
        self.notify(EngineEvent::CpuStepped { cycles });
        Ok(cycles)
    }

    pub fn run_cpu(&mut self, max_cycles: u64) -> EngineResult<u64> {
        self.cpu.run(&mut self.mem, max_cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{BufferedOutput, ScriptedInput};

    fn engine() -> Engine {
        Engine::new(
            EngineConfig::default(),
            Box::new(BufferedOutput::default()),
            Box::new(ScriptedInput::new(Vec::new())),
        )
    }

    #[test]
    fn load_and_run_sum_of_squares() {
        let mut eng = engine();
        eng.load("10 S = 0\n20 FOR I = 1 TO 3\n30 S = S + I*I\n40 NEXT I\n")
            .unwrap();
        eng.run_basic(1000).unwrap();
        assert_eq!(eng.interpreter.variable("S"), basic::Value::Number(14.0));
    }

    #[test]
    fn breakpoint_pauses_the_basic_run_loop() {
        let mut eng = engine();
        eng.load("10 X = 1\n20 X = 2\n30 X = 3\n").unwrap();
        eng.debugger.set_breakpoint(Location::Line(20), "stop-here", None);
        let executed = eng.run_basic(1000).unwrap();
        assert_eq!(executed, 1);
        assert!(eng.debugger.is_paused());
        assert_eq!(eng.interpreter.variable("X"), basic::Value::Integer(1));
    }
}
