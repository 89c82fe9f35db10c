//! The **probe capability** consumed by the scanner.
//!
//! A probe answers one question per call: does this host answer, does this
//! port accept a connection, what is this host's MAC or name. It never fails;
//! anything that goes wrong is reported as `false` or an empty string.
//!
//! Production code uses the system implementation from `netsweep-core`, tests
//! plug in deterministic fakes.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait NetworkProbe: Send + Sync {
    /// Sends an echo request and waits up to `timeout` for the reply.
    ///
    /// Returns `false` on any failure, including cancellation.
    async fn ping(&self, addr: Ipv4Addr, timeout: Duration, cancel: &CancellationToken) -> bool;

    /// Attempts a TCP handshake with `addr:port` within `timeout`.
    async fn tcp_connect(
        &self,
        addr: Ipv4Addr,
        port: u16,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> bool;

    /// Hardware address of `target` as seen from the interface owning `source`.
    ///
    /// Formatted `XX:XX:XX:XX:XX:XX`, empty when unknown. Loopback targets
    /// resolve to the all-zero address.
    async fn resolve_mac(&self, target: Ipv4Addr, source: Ipv4Addr) -> String;

    /// Reverse lookup of `addr`, empty when no name is found.
    async fn resolve_hostname(&self, addr: Ipv4Addr) -> String;
}
