use std::net::Ipv4Addr;

use pnet::util::MacAddr;

/// Hardware address reported for loopback targets.
pub const LOOPBACK_MAC: &str = "00:00:00:00:00:00";

/// Formats a hardware address as upper-case, colon separated hex.
pub fn format_mac(mac: MacAddr) -> String {
    let MacAddr(a, b, c, d, e, f) = mac;
    [a, b, c, d, e, f]
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<String>>()
        .join(":")
}

/// MAC string for `target` when it needs no resolution at all.
pub fn special_case_mac(target: Ipv4Addr) -> Option<&'static str> {
    target.is_loopback().then_some(LOOPBACK_MAC)
}
