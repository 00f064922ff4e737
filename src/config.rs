//! Construction-time configuration for the engine.

/// Tunables gathered into one struct so `Engine::new` takes a single argument,
/// the way a real deployment would load them from a config file even though
/// this crate has no external config format to parse.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Capacity of the memory access-tracing ring buffer.
    pub access_log_capacity: usize,
    /// Capacity of the debugger's execution trace ring buffer.
    pub trace_capacity: usize,
    /// Maximum depth of the FOR and GOSUB control-flow stacks (each).
    /// Must be at least 32 to hold a useful execution history.
    pub control_stack_limit: usize,
    /// Whether the default `$FFFA-$FFFF` interrupt-vector region is
    /// installed read-only (ROM-like) or left writable.
    pub protect_interrupt_vectors: bool,
    /// Seed for the `RND` builtin's PRNG. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            access_log_capacity: 4096,
            trace_capacity: 1024,
            control_stack_limit: 64,
            protect_interrupt_vectors: true,
            rng_seed: None,
        }
    }
}
