//! Shared model and contracts for the netsweep workspace.
//!
//! * [`network`]: scan results, interface records and the textual range grammars.
//! * [`probe`]: the capability a scan needs from the network.
//! * [`error`]: the failures a scan can surface to its caller.
//! * [`config`]: scan limits and run-wide flags.

pub mod config;
pub mod error;
pub mod network;
pub mod probe;
