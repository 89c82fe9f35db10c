//! MAC address resolution for IPv4 neighbours.
//!
//! The kernel's neighbour table is consulted first; a successful ping has
//! usually just populated it. Only when it has no entry is an ARP request
//! sent from the interface that owns the source address, which needs raw
//! socket privileges.

use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use pnet::datalink::{self, Channel, MacAddr, NetworkInterface};
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use tracing::trace;

pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;

const NEIGHBOUR_TABLE: &str = "/proc/net/arp";
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Hardware address of `target`, or `None` when it cannot be learned.
pub fn resolve(target: Ipv4Addr, source: Ipv4Addr, wait: Duration) -> Option<MacAddr> {
    if let Some(mac) = neighbour_table_lookup(target) {
        return Some(mac);
    }

    if source.is_unspecified() {
        return None;
    }

    match active_request(target, source, wait) {
        Ok(mac) => mac,
        Err(e) => {
            trace!("ARP request for {target} failed: {e:#}");
            None
        }
    }
}

fn neighbour_table_lookup(target: Ipv4Addr) -> Option<MacAddr> {
    let contents: String = std::fs::read_to_string(NEIGHBOUR_TABLE).ok()?;
    parse_neighbour_table(&contents, target)
}

/// Finds `target` in `/proc/net/arp` formatted text.
///
/// Incomplete entries (flags `0x0` or an all-zero address) are skipped.
fn parse_neighbour_table(contents: &str, target: Ipv4Addr) -> Option<MacAddr> {
    contents.lines().skip(1).find_map(|line| {
        let columns: Vec<&str> = line.split_whitespace().collect();
        let [ip, _hw_type, flags, mac, ..] = columns.as_slice() else {
            return None;
        };

        if ip.parse::<Ipv4Addr>().ok()? != target || *flags == "0x0" {
            return None;
        }

        mac.parse::<MacAddr>().ok().filter(|mac| !mac.is_zero())
    })
}

fn active_request(target: Ipv4Addr, source: Ipv4Addr, wait: Duration) -> anyhow::Result<Option<MacAddr>> {
    let intf: NetworkInterface = datalink::interfaces()
        .into_iter()
        .find(|intf| intf.ips.iter().any(|net| net.ip() == IpAddr::V4(source)))
        .with_context(|| format!("no interface owns {source}"))?;
    let src_mac: MacAddr = intf
        .mac
        .with_context(|| format!("{} has no MAC address", intf.name))?;

    let config = datalink::Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    };
    let (mut tx, mut rx) = match datalink::channel(&intf, config)
        .with_context(|| format!("opening datalink channel on {}", intf.name))?
    {
        Channel::Ethernet(tx, rx) => (tx, rx),
        _ => bail!("unsupported channel type on {}", intf.name),
    };

    let mut buffer = [0u8; ETH_HDR_LEN + ARP_LEN];
    request_frame(&mut buffer, src_mac, source, target)?;
    if let Some(Err(e)) = tx.send_to(&buffer, None) {
        return Err(e).context("sending ARP request");
    }

    let deadline: Instant = Instant::now() + wait;
    while Instant::now() < deadline {
        match rx.next() {
            Ok(frame) => {
                if let Some(mac) = parse_reply(frame, target) {
                    return Ok(Some(mac));
                }
            }
            Err(e) if matches!(e.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock) => {}
            Err(e) => return Err(e).context("reading ARP reply"),
        }
    }

    Ok(None)
}

/// Writes a broadcast Ethernet frame carrying an ARP request into `buffer`.
pub fn request_frame(
    buffer: &mut [u8],
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    target_addr: Ipv4Addr,
) -> anyhow::Result<()> {
    if buffer.len() < ETH_HDR_LEN + ARP_LEN {
        bail!("buffer too small for an ARP frame");
    }

    {
        let mut eth = MutableEthernetPacket::new(&mut buffer[..ETH_HDR_LEN + ARP_LEN])
            .context("ethernet header does not fit")?;
        eth.set_destination(MacAddr::broadcast());
        eth.set_source(src_mac);
        eth.set_ethertype(EtherTypes::Arp);
    }

    let mut arp = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("ARP payload does not fit")?;
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Request);
    arp.set_sender_hw_addr(src_mac);
    arp.set_target_hw_addr(MacAddr::zero());
    arp.set_sender_proto_addr(src_addr);
    arp.set_target_proto_addr(target_addr);
    Ok(())
}

/// Sender hardware address of an ARP reply coming from `target`.
pub fn parse_reply(frame: &[u8], target: Ipv4Addr) -> Option<MacAddr> {
    let eth = EthernetPacket::new(frame)?;
    if eth.get_ethertype() != EtherTypes::Arp {
        return None;
    }

    let arp = ArpPacket::new(eth.payload())?;
    let is_reply: bool = arp.get_operation() == ArpOperations::Reply;
    (is_reply && arp.get_sender_proto_addr() == target).then(|| arp.get_sender_hw_addr())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
