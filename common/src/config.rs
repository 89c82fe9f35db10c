use std::time::Duration;

/// Upper bound on the addresses a single subnet sweep may enumerate.
pub const MAX_HOSTS: usize = 512;

/// Upper bound on the ports a single port sweep may enumerate.
pub const MAX_PORTS: usize = 1000;

/// Number of concurrent probe workers per scan.
pub const WORKER_COUNT: usize = 50;

pub const DEFAULT_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips reverse DNS lookups for hosts that answer.
    pub no_dns: bool,
    /// Output verbosity reduction, one level per `-q`.
    pub quiet: u8,
}

/// Converts a user supplied millisecond timeout into a probe timeout.
///
/// A zero timeout would make every probe fail instantly, so it is raised to 1ms.
pub fn probe_timeout(timeout_ms: u64) -> Duration {
    Duration::from_millis(timeout_ms.max(1))
}
