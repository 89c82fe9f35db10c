use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Completes a TCP handshake with `addr:port` or gives up after `probe_timeout`.
///
/// Refused, unreachable, timed out and cancelled attempts all report `false`.
pub async fn handshake_probe(
    addr: Ipv4Addr,
    port: u16,
    probe_timeout: Duration,
    cancel: &CancellationToken,
) -> bool {
    let socket_addr: SocketAddr = SocketAddr::new(IpAddr::V4(addr), port);

    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        res = timeout(probe_timeout, TcpStream::connect(socket_addr)) => match res {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                trace!("{socket_addr} refused: {e}");
                false
            }
            Err(_elapsed) => false,
        },
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
