use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use colored::*;
use netsweep_common::config::{self, Config};
use netsweep_common::error::ScanError;
use netsweep_common::network::host::HostScanResult;
use tracing::{info, warn};

use crate::commands;
use crate::mprint;
use crate::terminal::{colors, print, spinner::Spinner};

type Detail = (String, ColoredString);

pub struct DiscoverArgs {
    pub interface_ip: String,
    pub range: Option<String>,
    pub include_down: bool,
    pub timeout_ms: u64,
}

pub async fn discover(args: DiscoverArgs, cfg: &Config) -> anyhow::Result<()> {
    let scanner = commands::system_scanner(cfg);
    let cancel = commands::cancel_on_ctrl_c();
    let target: &str = args.range.as_deref().unwrap_or(&args.interface_ip);

    let spinner = Spinner::start(format!("Sweeping {target}..."), cfg.quiet);
    let start_time: Instant = Instant::now();
    let outcome = scanner
        .scan_subnet(
            &args.interface_ip,
            args.range.as_deref(),
            args.include_down,
            config::probe_timeout(args.timeout_ms),
            &cancel,
        )
        .await;
    spinner.finish();

    let mut hosts: Vec<HostScanResult> = match outcome {
        Ok(hosts) => hosts,
        Err(ScanError::Cancelled) => {
            warn!("Discovery cancelled, no results kept");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    discovery_ends(&mut hosts, start_time.elapsed(), cfg);
    Ok(())
}

fn discovery_ends(hosts: &mut [HostScanResult], total_time: Duration, cfg: &Config) {
    if hosts.is_empty() {
        print::header("zero hosts detected", cfg.quiet);
        print::no_results("no host answered");
        return;
    }

    print::header("network discovery", cfg.quiet);
    hosts.sort_by_key(|host| host.address().parse::<Ipv4Addr>().ok());
    print_hosts(hosts, cfg);
    print_summary(hosts, total_time, cfg);
}

fn print_hosts(hosts: &[HostScanResult], cfg: &Config) {
    for (idx, host) in hosts.iter().enumerate() {
        match cfg.quiet {
            0 | 1 => print_host_tree(host, idx),
            _ => print::print_status(host.address()),
        }
        if cfg.quiet < 2 && idx + 1 != hosts.len() {
            mprint!();
        }
    }
}

fn print_summary(hosts: &[HostScanResult], total_time: Duration, cfg: &Config) {
    let up: usize = hosts.iter().filter(|host| host.is_up()).count();
    let output: String = format!(
        "Discovery Complete: {up} active hosts identified in {:.2}s",
        total_time.as_secs_f64()
    );

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            info!("{}", output);
        }
    }
}

fn print_host_tree(host: &HostScanResult, idx: usize) {
    let hostname: &str = match host.hostname() {
        "" => "No hostname",
        name => name,
    };
    print::tree_head(idx, hostname);
    print::as_tree_one_level(&host_details(host));
}

fn host_details(host: &HostScanResult) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "IPv4".to_string(),
        host.address().color(colors::IPV4_ADDR),
    )];

    if !host.mac_address().is_empty() {
        details.push(("MAC".to_string(), host.mac_address().color(colors::MAC_ADDR)));
    }

    let status: ColoredString = match host.is_up() {
        true => "up".color(colors::PORT_OPEN),
        false => "down".color(colors::HOST_DOWN),
    };
    details.push(("Status".to_string(), status));

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
