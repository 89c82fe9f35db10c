//! The **system probe**: the probe capability backed by real sockets.
//!
//! Each probe kind lives in its own submodule; [`SystemProbe`] only wires
//! them to the [`NetworkProbe`] contract and folds their failures into
//! `false` or an empty string.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use netsweep_common::network::mac;
use netsweep_common::probe::NetworkProbe;
use tokio_util::sync::CancellationToken;

pub mod arp;
pub mod dns;
pub mod icmp;
pub mod tcp;

/// How long an active ARP request waits for its reply.
const ARP_REPLY_WAIT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct SystemProbe {
    resolve_names: bool,
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            resolve_names: true,
        }
    }

    /// Disables reverse DNS; every hostname resolves to an empty string.
    pub fn without_dns(mut self) -> Self {
        self.resolve_names = false;
        self
    }
}

#[async_trait]
impl NetworkProbe for SystemProbe {
    async fn ping(&self, addr: Ipv4Addr, timeout: Duration, cancel: &CancellationToken) -> bool {
        icmp::echo_probe(addr, timeout, cancel).await
    }

    async fn tcp_connect(
        &self,
        addr: Ipv4Addr,
        port: u16,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> bool {
        tcp::handshake_probe(addr, port, timeout, cancel).await
    }

    async fn resolve_mac(&self, target: Ipv4Addr, source: Ipv4Addr) -> String {
        if let Some(special) = mac::special_case_mac(target) {
            return special.to_string();
        }

        tokio::task::spawn_blocking(move || arp::resolve(target, source, ARP_REPLY_WAIT))
            .await
            .ok()
            .flatten()
            .map(mac::format_mac)
            .unwrap_or_default()
    }

    async fn resolve_hostname(&self, addr: Ipv4Addr) -> String {
        if !self.resolve_names {
            return String::new();
        }
        dns::reverse_lookup(addr).await
    }
}
