//! Queries about the local machine.

use std::net::Ipv4Addr;

use anyhow::Context;
use netsweep_common::network::interface::NetworkInterfaceInfo;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::debug;

const ROUTE_TABLE: &str = "/proc/net/route";

/// Lists the interfaces a subnet sweep can start from.
///
/// Only interfaces that are up, not loopback and carry an IPv4 address are
/// reported. A loopback entry is always appended last.
pub fn list_interfaces() -> anyhow::Result<Vec<NetworkInterfaceInfo>> {
    let routes: String = read_route_table().unwrap_or_default();

    let mut infos: Vec<NetworkInterfaceInfo> = datalink::interfaces()
        .iter()
        .filter(|intf| intf.is_up() && !intf.is_loopback())
        .filter_map(|intf| {
            let net: Ipv4Network = first_ipv4(intf)?;
            let gateway: String = parse_default_gateway(&routes, &intf.name)
                .map(|gw| gw.to_string())
                .unwrap_or_default();
            let description: String = if intf.description.is_empty() {
                intf.name.clone()
            } else {
                intf.description.clone()
            };

            Some(NetworkInterfaceInfo {
                id: intf.index.to_string(),
                name: intf.name.clone(),
                description,
                ip_address: net.ip().to_string(),
                net_mask: net.mask().to_string(),
                gateway,
            })
        })
        .collect();

    debug!("Found {} usable interface(s)", infos.len());
    infos.push(NetworkInterfaceInfo::loopback());
    Ok(infos)
}

fn first_ipv4(intf: &NetworkInterface) -> Option<Ipv4Network> {
    intf.ips.iter().find_map(|&ip| match ip {
        IpNetwork::V4(net) => Some(net),
        _ => None,
    })
}

#[cfg(target_os = "linux")]
fn read_route_table() -> anyhow::Result<String> {
    std::fs::read_to_string(ROUTE_TABLE).with_context(|| format!("reading {ROUTE_TABLE}"))
}

#[cfg(not(target_os = "linux"))]
fn read_route_table() -> anyhow::Result<String> {
    anyhow::bail!("{ROUTE_TABLE} is only available on Linux")
}

/// Default gateway of `iface` from `/proc/net/route` formatted text.
///
/// Addresses in that table are hex encoded in host byte order.
fn parse_default_gateway(contents: &str, iface: &str) -> Option<Ipv4Addr> {
    contents.lines().skip(1).find_map(|line| {
        let columns: Vec<&str> = line.split_whitespace().collect();
        let [name, destination, gateway, ..] = columns.as_slice() else {
            return None;
        };

        if *name != iface || *destination != "00000000" {
            return None;
        }

        let raw: u32 = u32::from_str_radix(gateway, 16).ok()?;
        let addr = Ipv4Addr::from(raw.to_le_bytes());
        (!addr.is_unspecified()).then_some(addr)
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
