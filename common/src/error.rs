use thiserror::Error;

/// Failures a scan reports to its caller.
///
/// Unreachable hosts, closed ports and failed lookups are never errors, they
/// are recorded in the scan results instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Scan range too large ({count} hosts, max {max})")]
    TooManyHosts { count: usize, max: usize },

    #[error("Port range too large ({count} ports, max {max})")]
    TooManyPorts { count: usize, max: usize },

    #[error("Scan was cancelled")]
    Cancelled,

    /// A probe worker panicked or was aborted, so some targets have no result.
    #[error("Scan worker stopped abnormally: {0}")]
    WorkerFailed(String),
}

impl ScanError {
    /// True for the errors caused by an oversized request.
    pub fn is_input_too_large(&self) -> bool {
        matches!(self, Self::TooManyHosts { .. } | Self::TooManyPorts { .. })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
