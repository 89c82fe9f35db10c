pub mod discover;
pub mod interfaces;
pub mod scan;
pub mod serve;

use std::net::SocketAddr;

use clap::{ArgAction, Parser, Subcommand};
use netsweep_common::config::{Config, DEFAULT_TIMEOUT_MS};
use netsweep_core::{Scanner, SystemProbe};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Parser)]
#[command(name = "netsweep", version)]
#[command(about = "A concurrent LAN host discovery and port scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output; repeat for less (-qq)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Skip reverse DNS lookups of hosts that answer
    #[arg(long, global = true)]
    pub no_dns: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the local interfaces a sweep can start from
    #[command(alias = "i")]
    Interfaces,
    /// Discover hosts around a local interface
    #[command(alias = "d")]
    Discover {
        /// IPv4 address of the interface to sweep from
        interface_ip: String,
        /// Address range instead of the interface's /24, e.g. 192.168.1.10-50
        #[arg(short, long)]
        range: Option<String>,
        /// Also report hosts that did not answer
        #[arg(long)]
        include_down: bool,
        /// Per-probe timeout in milliseconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
        timeout_ms: u64,
    },
    /// Scan TCP ports on one host
    #[command(alias = "s")]
    Scan {
        /// IPv4 address of the host
        ip: String,
        /// Ports and ranges instead of the default list, e.g. 22,80,8000-8100
        #[arg(short, long)]
        ports: Option<String>,
        /// Per-probe timeout in milliseconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
        timeout_ms: u64,
    },
    /// Serve the scanner over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:5080")]
        bind: SocketAddr,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Scanner over the system probe, honouring `--no-dns`.
pub fn system_scanner(cfg: &Config) -> Scanner<SystemProbe> {
    let probe: SystemProbe = if cfg.no_dns {
        SystemProbe::new().without_dns()
    } else {
        SystemProbe::new()
    };
    Scanner::new(probe)
}

/// Token that is cancelled on the first Ctrl+C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping scan...");
            trigger.cancel();
        }
    });

    cancel
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
