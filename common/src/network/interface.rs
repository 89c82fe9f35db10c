use serde::{Deserialize, Serialize};

/// A local network interface as reported to API consumers.
///
/// `ip_address` is the interface's first IPv4 address, which is also the
/// `interface_ip` a subnet sweep is started from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ip_address: String,
    pub net_mask: String,
    pub gateway: String,
}

impl NetworkInterfaceInfo {
    /// The loopback entry appended to every interface listing so local
    /// services can be scanned without a physical network.
    pub fn loopback() -> Self {
        Self {
            id: "Loopback".to_string(),
            name: "Loopback".to_string(),
            description: "Localhost".to_string(),
            ip_address: "127.0.0.1".to_string(),
            net_mask: "255.0.0.0".to_string(),
            gateway: String::new(),
        }
    }
}
