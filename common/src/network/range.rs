//! # Address Range Grammar
//!
//! Expands the address expressions accepted by a subnet sweep into concrete
//! IPv4 targets.
//!
//! Supported formats:
//! * **Host**: a single address (e.g., `192.168.1.5`).
//! * **Suffix range**: `Start-LastOctet` (e.g., `192.168.1.10-20`).
//! * **Full range**: `Start-End` within one `/24` (e.g., `192.168.1.10-192.168.1.20`).
//!
//! Ranges only run upwards and never leave the `/24` of their start address.
//! Malformed, reversed or cross-subnet input expands to an empty list rather
//! than an error.

use std::net::Ipv4Addr;

/// An inclusive run of IPv4 addresses sharing their first three octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    /// Builds a range, or `None` when the ends sit in different `/24`s or
    /// `start_addr` comes after `end_addr`.
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Option<Self> {
        let [a, b, c, first] = start_addr.octets();
        let [x, y, z, last] = end_addr.octets();

        if (a, b, c) != (x, y, z) || first > last {
            return None;
        }

        Some(Self {
            start_addr,
            end_addr,
        })
    }

    pub fn to_iter(self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }
}

/// Expands a range expression into dotted-quad strings, in ascending order.
pub fn parse_address_range(text: &str) -> Vec<String> {
    expand_address_range(text)
        .into_iter()
        .map(|addr| addr.to_string())
        .collect()
}

/// Expands a range expression into addresses, in ascending order.
pub fn expand_address_range(text: &str) -> Vec<Ipv4Addr> {
    let text = text.trim();

    let Some((start_str, end_str)) = text.split_once('-') else {
        return text.parse::<Ipv4Addr>().into_iter().collect();
    };

    let Ok(start_addr) = start_str.trim().parse::<Ipv4Addr>() else {
        return Vec::new();
    };

    parse_range_end_addr(end_str.trim(), start_addr)
        .and_then(|end_addr| Ipv4Range::new(start_addr, end_addr))
        .map(|range| range.to_iter().collect())
        .unwrap_or_default()
}

/// The `/24` fallback sweep around an interface address: suffixes `1..=254`.
///
/// The interface's own address is part of the sweep. The real netmask is not
/// consulted.
pub fn subnet_sweep(interface_addr: Ipv4Addr) -> Vec<Ipv4Addr> {
    let [a, b, c, _] = interface_addr.octets();
    (1..=254).map(|last| Ipv4Addr::new(a, b, c, last)).collect()
}

/// Resolves the right-hand side of a range.
///
/// A bare number replaces the last octet of the start address (`192.168.1.10-20`
/// ends at `192.168.1.20`); anything else must be a full address. A bare number
/// above 255 has no valid reading.
fn parse_range_end_addr(end_str: &str, start_addr: Ipv4Addr) -> Option<Ipv4Addr> {
    if !end_str.is_empty() && end_str.bytes().all(|b| b.is_ascii_digit()) {
        let last_octet = end_str.parse::<u8>().ok()?;
        let [a, b, c, _] = start_addr.octets();
        return Some(Ipv4Addr::new(a, b, c, last_octet));
    }

    end_str.parse::<Ipv4Addr>().ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
