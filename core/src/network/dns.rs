use std::net::{IpAddr, Ipv4Addr};

use tracing::trace;

/// Reverse DNS lookup of `addr`, empty when no PTR record is found.
///
/// The resolver call blocks, so it runs on the blocking pool.
pub async fn reverse_lookup(addr: Ipv4Addr) -> String {
    let ip: IpAddr = IpAddr::V4(addr);

    let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip)).await;

    match lookup {
        Ok(Ok(name)) => numeric_to_empty(name, addr),
        Ok(Err(e)) => {
            trace!("reverse lookup of {addr} failed: {e}");
            String::new()
        }
        Err(_join_error) => String::new(),
    }
}

/// Some resolvers answer a missing PTR record with the address itself.
fn numeric_to_empty(name: String, addr: Ipv4Addr) -> String {
    if name == addr.to_string() {
        String::new()
    } else {
        name
    }
}
