use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::trace;

const PAYLOAD: [u8; 56] = [0; 56];

/// Sends one ICMP echo request and waits up to `probe_timeout` for the reply.
///
/// Raw ICMP needs either elevated privileges or an unprivileged ping socket;
/// when neither is available every host reports `false`.
pub async fn echo_probe(addr: Ipv4Addr, probe_timeout: Duration, cancel: &CancellationToken) -> bool {
    let target: IpAddr = IpAddr::V4(addr);

    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        res = timeout(probe_timeout, surge_ping::ping(target, &PAYLOAD)) => match res {
            Ok(Ok((_packet, rtt))) => {
                trace!("{addr} answered in {rtt:?}");
                true
            }
            Ok(Err(e)) => {
                trace!("echo to {addr} failed: {e}");
                false
            }
            Err(_elapsed) => false,
        },
    }
}
