//! Port list grammar and the default port sweep.
//!
//! A port expression is a comma separated list of single ports and inclusive
//! ranges, e.g. `22, 80, 8000-8010`. Tokens that do not parse, ranges that run
//! backwards and ports outside `1..=65535` are dropped without error.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Well known service ports probed when no port expression is given.
pub const COMMON_PORTS: [u16; 13] = [21, 22, 23, 25, 53, 80, 110, 135, 139, 143, 443, 445, 3389];

/// Industrial protocol ports (S7, Modbus, IEC 104, FINS, EtherNet/IP, BACnet, ...)
/// probed alongside [`COMMON_PORTS`].
pub const INDUSTRIAL_PORTS: [u16; 10] = [
    102, 502, 1080, 2404, 4000, 9600, 19132, 20000, 44818, 47808,
];

/// Union of the common and industrial port lists.
pub fn default_ports() -> BTreeSet<u16> {
    COMMON_PORTS
        .into_iter()
        .chain(INDUSTRIAL_PORTS)
        .collect()
}

/// Parses a port expression into a de-duplicated set.
pub fn parse_port_set(text: &str) -> BTreeSet<u16> {
    text.split(',')
        .filter_map(|token| parse_token(token.trim()))
        .flatten()
        .collect()
}

fn parse_token(token: &str) -> Option<RangeInclusive<u16>> {
    match token.split_once('-') {
        Some((start_str, end_str)) => {
            let start = parse_port(start_str)?;
            let end = parse_port(end_str)?;
            (start <= end).then_some(start..=end)
        }
        None => parse_port(token).map(|port| port..=port),
    }
}

fn parse_port(s: &str) -> Option<u16> {
    match s.trim().parse::<u32>() {
        Ok(port @ 1..=65535) => u16::try_from(port).ok(),
        _ => None,
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
