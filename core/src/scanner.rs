//! The scan **orchestrator**.
//!
//! [`Scanner`] turns a sweep request into a target list, enforces the size
//! limits, fans the targets out over the [`pool`] and folds every probe
//! outcome into the result model. It depends only on the [`NetworkProbe`]
//! abstraction, so the same orchestration runs against real sockets or a
//! test double.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use netsweep_common::config::{MAX_HOSTS, MAX_PORTS, WORKER_COUNT};
use netsweep_common::error::ScanError;
use netsweep_common::network::host::{HostScanResult, PortScanResult};
use netsweep_common::network::{ports, range};
use netsweep_common::probe::NetworkProbe;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub mod pool;

pub struct Scanner<P> {
    probe: Arc<P>,
}

impl<P> Clone for Scanner<P> {
    fn clone(&self) -> Self {
        Self {
            probe: Arc::clone(&self.probe),
        }
    }
}

impl<P: NetworkProbe + 'static> Scanner<P> {
    pub fn new(probe: P) -> Self {
        Self::from_arc(Arc::new(probe))
    }

    /// Builds a scanner around a probe the caller keeps a handle to.
    pub fn from_arc(probe: Arc<P>) -> Self {
        Self { probe }
    }

    /// Sweeps `address_range`, or the `/24` around `interface_ip` when no range is given.
    ///
    /// `interface_ip` is also the source address for MAC resolution. An
    /// unparseable range or interface address yields an empty sweep. Hosts
    /// that do not answer are only reported when `include_down` is set.
    pub async fn scan_subnet(
        &self,
        interface_ip: &str,
        address_range: Option<&str>,
        include_down: bool,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Vec<HostScanResult>, ScanError> {
        let source: Option<Ipv4Addr> = interface_ip.trim().parse().ok();

        let targets: Vec<Ipv4Addr> = match (address_range, source) {
            (Some(text), _) => range::expand_address_range(text),
            (None, Some(addr)) => range::subnet_sweep(addr),
            (None, None) => {
                warn!("Interface address '{interface_ip}' is not IPv4, nothing to sweep");
                Vec::new()
            }
        };

        self.scan_hosts(
            targets,
            source.unwrap_or(Ipv4Addr::UNSPECIFIED),
            include_down,
            timeout,
            cancel,
        )
        .await
    }

    /// Probes an explicit list of addresses.
    ///
    /// Fails with [`ScanError::TooManyHosts`] before sending anything when the
    /// list exceeds [`MAX_HOSTS`].
    pub async fn scan_hosts(
        &self,
        targets: Vec<Ipv4Addr>,
        source: Ipv4Addr,
        include_down: bool,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Vec<HostScanResult>, ScanError> {
        let count: usize = targets.len();
        if count > MAX_HOSTS {
            warn!("Rejecting sweep of {count} hosts (max {MAX_HOSTS})");
            return Err(ScanError::TooManyHosts {
                count,
                max: MAX_HOSTS,
            });
        }

        info!("Sweeping {count} hosts with {timeout:?} timeout");

        let probe = Arc::clone(&self.probe);
        let job_cancel = cancel.clone();
        let results: Vec<HostScanResult> = pool::run(targets, WORKER_COUNT, cancel, move |target| {
            let probe = Arc::clone(&probe);
            let cancel = job_cancel.clone();
            async move { probe_host(probe.as_ref(), target, source, timeout, &cancel).await }
        })
        .await?;

        let up: usize = results.iter().filter(|host| host.is_up()).count();
        info!("Sweep complete: {up} of {count} hosts answered");

        Ok(results
            .into_iter()
            .filter(|host| host.is_up() || include_down)
            .collect())
    }

    /// Probes `port_range` on `address`, or the default port list when none are given.
    pub async fn scan_ports(
        &self,
        address: &str,
        port_range: Option<&str>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<PortScanResult, ScanError> {
        let port_set: BTreeSet<u16> = match port_range {
            Some(text) => ports::parse_port_set(text),
            None => ports::default_ports(),
        };

        self.scan_port_set(address, port_set, timeout, cancel).await
    }

    /// Probes an explicit port set.
    ///
    /// Fails with [`ScanError::TooManyPorts`] before connecting when the set
    /// exceeds [`MAX_PORTS`]. Refused, filtered and timed out ports are all
    /// simply absent from the result.
    pub async fn scan_port_set(
        &self,
        address: &str,
        port_set: BTreeSet<u16>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<PortScanResult, ScanError> {
        let count: usize = port_set.len();
        if count > MAX_PORTS {
            warn!("Rejecting scan of {count} ports (max {MAX_PORTS})");
            return Err(ScanError::TooManyPorts {
                count,
                max: MAX_PORTS,
            });
        }

        let Ok(target) = address.trim().parse::<Ipv4Addr>() else {
            warn!("'{address}' is not an IPv4 address, no port can be reached");
            return Ok(PortScanResult::new(address, std::iter::empty()));
        };

        info!("Scanning {count} ports on {target} with {timeout:?} timeout");

        let probe = Arc::clone(&self.probe);
        let job_cancel = cancel.clone();
        let outcomes: Vec<(u16, bool)> =
            pool::run(port_set.into_iter().collect(), WORKER_COUNT, cancel, move |port| {
                let probe = Arc::clone(&probe);
                let cancel = job_cancel.clone();
                async move {
                    let open = probe.tcp_connect(target, port, timeout, &cancel).await;
                    if open {
                        debug!("{target}:{port} is open");
                    }
                    (port, open)
                }
            })
            .await?;

        let result = PortScanResult::new(
            address,
            outcomes
                .into_iter()
                .filter_map(|(port, open)| open.then_some(port)),
        );
        info!(
            "Port scan complete: {} of {count} ports open on {target}",
            result.open_ports().len()
        );

        Ok(result)
    }
}

/// Pings one target and, when it answers, resolves its MAC and hostname.
///
/// Lookup failures leave the respective field empty; they never turn an
/// answering host into a down one.
async fn probe_host<P: NetworkProbe + ?Sized>(
    probe: &P,
    target: Ipv4Addr,
    source: Ipv4Addr,
    timeout: Duration,
    cancel: &CancellationToken,
) -> HostScanResult {
    if !probe.ping(target, timeout, cancel).await {
        return HostScanResult::down(target.to_string());
    }

    let mac_address: String = probe.resolve_mac(target, source).await;
    let hostname: String = probe.resolve_hostname(target).await;
    debug!("{target} is up (hostname: '{hostname}', mac: '{mac_address}')");

    HostScanResult::up(target.to_string(), hostname, mac_address)
}
