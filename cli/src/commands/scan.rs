use std::time::{Duration, Instant};

use colored::*;
use netsweep_common::config::{self, Config};
use netsweep_common::error::ScanError;
use netsweep_common::network::host::PortScanResult;
use tracing::{info, warn};

use crate::commands;
use crate::mprint;
use crate::terminal::{colors, print, spinner::Spinner};

pub struct ScanArgs {
    pub ip: String,
    pub ports: Option<String>,
    pub timeout_ms: u64,
}

pub async fn scan(args: ScanArgs, cfg: &Config) -> anyhow::Result<()> {
    let scanner = commands::system_scanner(cfg);
    let cancel = commands::cancel_on_ctrl_c();

    let spinner = Spinner::start(format!("Scanning ports on {}...", args.ip), cfg.quiet);
    let start_time: Instant = Instant::now();
    let outcome = scanner
        .scan_ports(
            &args.ip,
            args.ports.as_deref(),
            config::probe_timeout(args.timeout_ms),
            &cancel,
        )
        .await;
    spinner.finish();

    let result: PortScanResult = match outcome {
        Ok(result) => result,
        Err(ScanError::Cancelled) => {
            warn!("Port scan cancelled, no results kept");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    scan_ends(&result, start_time.elapsed(), cfg);
    Ok(())
}

fn scan_ends(result: &PortScanResult, total_time: Duration, cfg: &Config) {
    if result.open_ports().is_empty() {
        print::header("zero open ports", cfg.quiet);
        print::no_results(&format!("no open port on {}", result.address()));
        return;
    }

    print::header("port scan", cfg.quiet);
    match cfg.quiet {
        0 | 1 => {
            print::tree_head(0, result.address());
            print::as_tree_one_level(&port_details(result.open_ports()));
        }
        _ => {
            for port in result.open_ports() {
                print::print_status(format!("{}:{port}", result.address()));
            }
        }
    }

    let output: String = format!(
        "Scan Complete: {} open ports found in {:.2}s",
        result.open_ports().len(),
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

fn port_details(open_ports: &[u16]) -> Vec<(String, ColoredString)> {
    open_ports
        .iter()
        .map(|port| (format!("{port}/tcp"), "open".color(colors::PORT_OPEN)))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
