//! Minimal line-mode shell over stdio: numbered-line program entry plus
//! RUN/NEW/LIST and direct-mode statement execution. Exercises the core
//! end to end; not part of the library's public surface.

use sixty5502::capabilities::{InputSource, OutputSink};
use sixty5502::config::EngineConfig;
use sixty5502::error::{EngineError, EngineResult};
use sixty5502::Engine;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&mut self, text: &str) {
        print!("{text}");
        let _ = io::stdout().flush();
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

struct StdinSource;

impl InputSource for StdinSource {
    fn request_line(&mut self, prompt: &str) -> EngineResult<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|_| EngineError::OutOfData)?;
        if line.is_empty() {
            return Err(EngineError::OutOfData);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

const RUN_CYCLE_BUDGET: u64 = 10_000_000;

fn main() {
    env_logger::init();
    let mut engine = Engine::new(EngineConfig::default(), Box::new(StdoutSink), Box::new(StdinSource));
    let mut program_lines: BTreeMap<u32, String> = BTreeMap::new();

    println!("READY.");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed.to_ascii_uppercase().as_str() {
            "NEW" => {
                program_lines.clear();
                println!("READY.");
                continue;
            }
            "LIST" => {
                for (n, text) in &program_lines {
                    println!("{n} {text}");
                }
                println!("READY.");
                continue;
            }
            "RUN" => {
                if let Err(e) = run_program(&mut engine, &program_lines) {
                    println!("{e}");
                }
                println!("READY.");
                continue;
            }
            "QUIT" | "EXIT" => break,
            _ => {}
        }

        if let Some((num_str, rest)) = split_line_number(trimmed) {
            if let Ok(n) = num_str.parse::<u32>() {
                let rest = rest.trim();
                if rest.is_empty() {
                    program_lines.remove(&n);
                } else {
                    program_lines.insert(n, rest.to_string());
                }
                continue;
            }
        }

        if let Err(e) = run_immediate(&mut engine, trimmed) {
            println!("{e}");
        }
    }
}

fn split_line_number(line: &str) -> Option<(&str, &str)> {
    let end = line.find(|c: char| !c.is_ascii_digit())?;
    if end == 0 {
        return None;
    }
    Some((&line[..end], &line[end..]))
}

fn run_program(engine: &mut Engine, program_lines: &BTreeMap<u32, String>) -> EngineResult<()> {
    engine.load(&render(program_lines))?;
    engine.run_basic(RUN_CYCLE_BUDGET)?;
    Ok(())
}

fn run_immediate(engine: &mut Engine, statement: &str) -> EngineResult<()> {
    engine.load(&format!("1 {statement}\n"))?;
    engine.run_basic(RUN_CYCLE_BUDGET)?;
    Ok(())
}

fn render(program_lines: &BTreeMap<u32, String>) -> String {
    let mut out = String::new();
    for (n, text) in program_lines {
        out.push_str(&format!("{n} {text}\n"));
    }
    out
}
