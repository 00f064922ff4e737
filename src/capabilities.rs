//! Capability traits for the host-provided collaborators the core talks to:
//! output, input, graphics, audio, and persistence. None of these are
//! implemented here — the core only defines the seam.

use crate::error::EngineResult;

/// Where PRINT and shell output go. Must not panic; a failing sink should
/// swallow the error rather than unwind through interpreter code.
pub trait OutputSink {
    fn write(&mut self, text: &str);

    /// Lets a host downcast to a concrete sink (e.g. `BufferedOutput`) to
    /// inspect what was written, without widening `write`'s own signature.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// A line-oriented input source for INPUT. `request_line` may block the
/// calling thread; async hosts can park the interpreter at the call site.
pub trait InputSource {
    fn request_line(&mut self, prompt: &str) -> EngineResult<String>;
}

/// A plain `Vec<String>` queue, handy for scripted input in tests.
pub struct ScriptedInput {
    lines: std::collections::VecDeque<String>,
}

impl ScriptedInput {
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn request_line(&mut self, _prompt: &str) -> EngineResult<String> {
        self.lines
            .pop_front()
            .ok_or(crate::error::EngineError::OutOfData)
    }
}

/// An in-memory sink, handy for tests and the line-mode shell's capture mode.
#[derive(Debug, Default, Clone)]
pub struct BufferedOutput {
    pub buffer: String,
}

impl OutputSink for BufferedOutput {
    fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// 320x200-class indexed-color raster surface, per the BASIC dialect's
/// SCREEN/PSET/LINE/CIRCLE family. Out-of-range coordinates clip silently.
pub trait Graphics {
    fn set_mode(&mut self, mode: u8);
    fn pset(&mut self, x: i32, y: i32, color: u8);
    fn preset(&mut self, x: i32, y: i32);
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u8, fill: bool);
    fn circle(&mut self, x: i32, y: i32, r: i32, color: u8, start: f64, end: f64, aspect: f64);
    fn paint(&mut self, x: i32, y: i32, fill: u8, border: u8);
    fn cls(&mut self);
    fn color(&mut self, fg: u8, bg: u8);
    fn point(&self, x: i32, y: i32) -> u8;
}

/// MML-driven tone generator, per the BASIC dialect's SOUND/PLAY family.
pub trait Audio {
    fn sound(&mut self, freq_hz: u16, duration_ticks: u16);
    fn play(&mut self, mml: &str);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn is_playing(&self) -> bool;
}

/// Named source-text storage, per the BASIC dialect's SAVE/LOAD family.
pub trait PersistentStore {
    fn save(&mut self, name: &str, source: &str) -> EngineResult<()>;
    fn load(&mut self, name: &str) -> EngineResult<Option<String>>;
    fn list(&self) -> Vec<String>;
    fn remove(&mut self, name: &str) -> EngineResult<()>;
}
