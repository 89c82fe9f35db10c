//! # Scan Results
//!
//! Records produced by the subnet and port sweeps. Both are built once per
//! scan and are immutable afterwards; their constructors uphold the result
//! invariants so no caller can produce an inconsistent record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Outcome of probing a single address during a subnet sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostScanResult {
    address: String,
    hostname: String,
    mac_address: String,
    is_up: bool,
}

impl HostScanResult {
    /// A host that answered. `hostname` and `mac_address` may be empty when
    /// their lookups failed.
    pub fn up(address: impl Into<String>, hostname: String, mac_address: String) -> Self {
        Self {
            address: address.into(),
            hostname,
            mac_address,
            is_up: true,
        }
    }

    /// A host that did not answer. Down hosts never carry a name or MAC.
    pub fn down(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            hostname: String::new(),
            mac_address: String::new(),
            is_up: false,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn mac_address(&self) -> &str {
        &self.mac_address
    }

    pub fn is_up(&self) -> bool {
        self.is_up
    }
}

/// Open TCP ports found on one address, ascending and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortScanResult {
    address: String,
    open_ports: Vec<u16>,
}

impl PortScanResult {
    /// Sorts and de-duplicates `open_ports` regardless of the order they were found in.
    pub fn new(address: impl Into<String>, open_ports: impl IntoIterator<Item = u16>) -> Self {
        let open_ports: BTreeSet<u16> = open_ports.into_iter().collect();
        Self {
            address: address.into(),
            open_ports: open_ports.into_iter().collect(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn open_ports(&self) -> &[u16] {
        &self.open_ports
    }
}
