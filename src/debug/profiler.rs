//! Per-line/per-address execution counters and a hotspot analyzer that
//! classifies them by share of total execution time.

use super::Location;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
struct Counter {
    execution_count: u64,
    total_ticks: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    HotInsideLoop,
    SlowPerInvocation,
    VeryFrequent,
    CriticalShare,
}

#[derive(Debug, Clone)]
pub struct Suggestion {
    pub location: Location,
    pub severity: Severity,
    pub category: IssueCategory,
    pub share: f64,
    pub execution_count: u64,
    pub average_ticks: f64,
}

/// Execution counts above which a line is "very frequent" regardless of its
/// time share — catches tight loops that are individually cheap but run a
/// huge number of times.
const VERY_FREQUENT_THRESHOLD: u64 = 10_000;
/// Average per-invocation cost above which a line is "slow per invocation"
/// even if it rarely runs.
const SLOW_PER_INVOCATION_THRESHOLD: f64 = 1_000.0;

#[derive(Debug, Default)]
pub struct Profiler {
    counters: HashMap<Location, Counter>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, location: Location, ticks: u64) {
        let counter = self.counters.entry(location).or_default();
        counter.execution_count += 1;
        counter.total_ticks += ticks;
    }

    pub fn execution_count(&self, location: Location) -> u64 {
        self.counters.get(&location).map(|c| c.execution_count).unwrap_or(0)
    }

    pub fn average_ticks(&self, location: Location) -> f64 {
        match self.counters.get(&location) {
            Some(c) if c.execution_count > 0 => c.total_ticks as f64 / c.execution_count as f64,
            _ => 0.0,
        }
    }

    /// Locations sorted by descending total execution time.
    pub fn sorted_by_total_time(&self) -> Vec<(Location, u64)> {
        let mut v: Vec<_> = self.counters.iter().map(|(&loc, c)| (loc, c.total_ticks)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }

    pub fn hotspots(&self) -> Vec<Suggestion> {
        let grand_total: u64 = self.counters.values().map(|c| c.total_ticks).sum();
        if grand_total == 0 {
            return Vec::new();
        }
        let mut suggestions = Vec::new();
        for (&location, counter) in &self.counters {
            let share = counter.total_ticks as f64 / grand_total as f64;
            let average = if counter.execution_count > 0 {
                counter.total_ticks as f64 / counter.execution_count as f64
            } else {
                0.0
            };
            let severity = match share {
                s if s >= 0.50 => Severity::Critical,
                s if s >= 0.30 => Severity::High,
                s if s >= 0.10 => Severity::Medium,
                _ => Severity::Low,
            };
            let category = if share >= 0.50 {
                IssueCategory::CriticalShare
            } else if counter.execution_count >= VERY_FREQUENT_THRESHOLD {
                IssueCategory::VeryFrequent
            } else if average >= SLOW_PER_INVOCATION_THRESHOLD {
                IssueCategory::SlowPerInvocation
            } else {
                IssueCategory::HotInsideLoop
            };
            if severity != Severity::Low || category != IssueCategory::HotInsideLoop {
                suggestions.push(Suggestion {
                    location,
                    severity,
                    category,
                    share,
                    execution_count: counter.execution_count,
                    average_ticks: average,
                });
            }
        }
        suggestions.sort_by(|a, b| b.share.partial_cmp(&a.share).unwrap());
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_dominant_line_is_classified_critical() {
        let mut p = Profiler::new();
        p.record(Location::Line(20), 900);
        p.record(Location::Line(30), 100);
        let hotspots = p.hotspots();
        assert_eq!(hotspots[0].location, Location::Line(20));
        assert_eq!(hotspots[0].severity, Severity::Critical);
        assert_eq!(hotspots[0].category, IssueCategory::CriticalShare);
    }

    #[test]
    fn empty_profiler_has_no_hotspots() {
        let p = Profiler::new();
        assert!(p.hotspots().is_empty());
    }
}
