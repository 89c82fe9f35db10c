use anyhow::Context;
use colored::*;
use netsweep_common::config::Config;
use netsweep_common::network::interface::NetworkInterfaceInfo;
use netsweep_core::system;

use crate::mprint;
use crate::terminal::{colors, print};

pub fn interfaces(cfg: &Config) -> anyhow::Result<()> {
    let infos: Vec<NetworkInterfaceInfo> =
        system::list_interfaces().context("listing network interfaces")?;

    for (idx, info) in infos.iter().enumerate() {
        match cfg.quiet {
            0 | 1 => {
                print::tree_head(idx, &info.name);
                print::as_tree_one_level(&interface_details(info));
                if idx + 1 != infos.len() {
                    mprint!();
                }
            }
            _ => print::print_status(format!("{} {}", info.name, info.ip_address)),
        }
    }

    Ok(())
}

fn interface_details(info: &NetworkInterfaceInfo) -> Vec<(String, ColoredString)> {
    let mut details: Vec<(String, ColoredString)> = vec![
        ("ID".to_string(), info.id.as_str().normal()),
        ("Desc".to_string(), info.description.as_str().normal()),
        ("IPv4".to_string(), info.ip_address.as_str().color(colors::IPV4_ADDR)),
        ("Mask".to_string(), info.net_mask.as_str().color(colors::IPV4_ADDR)),
    ];

    if !info.gateway.is_empty() {
        details.push(("Gateway".to_string(), info.gateway.as_str().color(colors::IPV4_ADDR)));
    }

    details
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
