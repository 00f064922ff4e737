//! Debug Instrumentation: breakpoints, watchpoints, an execution trace ring
//! buffer, and a profiler shared by the CPU core's address space and the
//! BASIC interpreter's line/variable space.

mod profiler;
mod trace;

pub use profiler::{IssueCategory, Profiler, Severity, Suggestion};
pub use trace::{ExecutionTrace, RegisterSnapshot, TraceRecord};

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Address(u16),
    Line(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WatchLocation {
    Address(u16),
    Variable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
    Both,
}

impl AccessKind {
    fn matches(&self, observed: AccessKind) -> bool {
        matches!(
            (self, observed),
            (AccessKind::Both, _) | (AccessKind::Read, AccessKind::Read) | (AccessKind::Write, AccessKind::Write)
        )
    }
}

#[derive(Debug, Clone)]
pub struct Breakpoint {
    pub name: String,
    pub enabled: bool,
    pub condition: Option<String>,
    pub hit_count: u64,
}

#[derive(Debug, Clone)]
pub struct Watchpoint {
    pub name: String,
    pub enabled: bool,
    pub kind: AccessKind,
    pub hit_count: u64,
}

#[derive(Debug, Clone)]
pub enum DebugEvent {
    Breakpoint { name: String, location: Location },
    Watchpoint { name: String, kind: AccessKind },
}

/// Owns all debug state. Does not itself evaluate condition expressions —
/// callers (the CPU loop, the interpreter) evaluate a breakpoint's
/// `condition` string against their own state and report the result.
#[derive(Debug)]
pub struct Debugger {
    breakpoints: HashMap<Location, Breakpoint>,
    watchpoints: HashMap<String, Watchpoint>,
    watch_addrs: HashMap<u16, String>,
    watch_vars: HashMap<String, String>,
    trace: ExecutionTrace,
    profiler: Profiler,
    paused: bool,
}

impl Debugger {
    pub fn new(trace_capacity: usize) -> Self {
        Self {
            breakpoints: HashMap::new(),
            watchpoints: HashMap::new(),
            watch_addrs: HashMap::new(),
            watch_vars: HashMap::new(),
            trace: ExecutionTrace::new(trace_capacity),
            profiler: Profiler::new(),
            paused: false,
        }
    }

    pub fn set_breakpoint(&mut self, location: Location, name: impl Into<String>, condition: Option<String>) {
        self.breakpoints.insert(
            location,
            Breakpoint {
                name: name.into(),
                enabled: true,
                condition,
                hit_count: 0,
            },
        );
    }

    pub fn remove_breakpoint(&mut self, location: Location) {
        self.breakpoints.remove(&location);
    }

    pub fn enable_breakpoint(&mut self, location: Location, enabled: bool) {
        if let Some(bp) = self.breakpoints.get_mut(&location) {
            bp.enabled = enabled;
        }
    }

    pub fn breakpoint(&self, location: Location) -> Option<&Breakpoint> {
        self.breakpoints.get(&location)
    }

    pub fn set_watchpoint(&mut self, location: WatchLocation, name: impl Into<String>, kind: AccessKind) {
        let name = name.into();
        match location {
            WatchLocation::Address(addr) => {
                self.watch_addrs.insert(addr, name.clone());
            }
            WatchLocation::Variable(var) => {
                self.watch_vars.insert(var, name.clone());
            }
        }
        self.watchpoints.insert(
            name.clone(),
            Watchpoint {
                name,
                enabled: true,
                kind,
                hit_count: 0,
            },
        );
    }

    pub fn remove_watchpoint(&mut self, location: WatchLocation) {
        let name = match location {
            WatchLocation::Address(addr) => self.watch_addrs.remove(&addr),
            WatchLocation::Variable(var) => self.watch_vars.remove(&var),
        };
        if let Some(name) = name {
            self.watchpoints.remove(&name);
        }
    }

    /// Consults the breakpoint table for `location`. `condition_holds` is
    /// `true` when there is no condition, or when the caller has already
    /// evaluated one and found it true.
    pub fn on_step(&mut self, location: Location, condition_holds: bool) -> Option<DebugEvent> {
        let bp = self.breakpoints.get_mut(&location)?;
        if !bp.enabled || !condition_holds {
            return None;
        }
        bp.hit_count += 1;
        self.paused = true;
        Some(DebugEvent::Breakpoint {
            name: bp.name.clone(),
            location,
        })
    }

    pub fn on_memory_access(&mut self, addr: u16, observed: AccessKind) -> Option<DebugEvent> {
        let name = self.watch_addrs.get(&addr)?.clone();
        self.fire_watchpoint(name, observed)
    }

    pub fn on_variable_access(&mut self, var: &str, observed: AccessKind) -> Option<DebugEvent> {
        let name = self.watch_vars.get(var)?.clone();
        self.fire_watchpoint(name, observed)
    }

    fn fire_watchpoint(&mut self, name: String, observed: AccessKind) -> Option<DebugEvent> {
        let wp = self.watchpoints.get_mut(&name)?;
        if !wp.enabled || !wp.kind.matches(observed) {
            return None;
        }
        wp.hit_count += 1;
        self.paused = true;
        Some(DebugEvent::Watchpoint {
            name: wp.name.clone(),
            kind: observed,
        })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn record_trace(
        &mut self,
        location: Location,
        registers: Option<RegisterSnapshot>,
        variables: Option<HashMap<String, String>>,
    ) {
        self.trace.record(location, registers, variables);
    }

    pub fn trace_records(&mut self) -> &[TraceRecord] {
        self.trace.records()
    }

    pub fn record_execution(&mut self, location: Location, ticks: u64) {
        self.profiler.record(location, ticks);
    }

    pub fn hotspots(&self) -> Vec<Suggestion> {
        self.profiler.hotspots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_fires_only_when_enabled_and_condition_holds() {
        let mut dbg = Debugger::new(16);
        dbg.set_breakpoint(Location::Line(100), "loop-entry", None);
        assert!(dbg.on_step(Location::Line(100), true).is_some());
        dbg.resume();
        dbg.enable_breakpoint(Location::Line(100), false);
        assert!(dbg.on_step(Location::Line(100), true).is_none());
    }

    #[test]
    fn watchpoint_on_variable_respects_access_kind() {
        let mut dbg = Debugger::new(16);
        dbg.set_watchpoint(WatchLocation::Variable("X".to_string()), "watch-x", AccessKind::Write);
        assert!(dbg.on_variable_access("X", AccessKind::Read).is_none());
        assert!(dbg.on_variable_access("X", AccessKind::Write).is_some());
    }
}
