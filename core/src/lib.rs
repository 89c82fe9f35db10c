//! Scanning engine for netsweep.
//!
//! * [`scanner`]: the orchestrator running subnet and port sweeps over a bounded worker pool.
//! * [`network`]: the system implementation of the probe capability.
//! * [`system`]: queries about the local machine's interfaces.

pub mod network;
pub mod scanner;
pub mod system;

pub use network::SystemProbe;
pub use scanner::Scanner;
