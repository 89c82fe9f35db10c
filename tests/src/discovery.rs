use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::time::Duration;

use netsweep_common::config::{MAX_HOSTS, WORKER_COUNT};
use netsweep_common::error::ScanError;
use netsweep_common::network::host::HostScanResult;
use tokio_util::sync::CancellationToken;

use crate::mock::{MOCK_MAC, MockProbe};

const TIMEOUT: Duration = Duration::from_millis(500);

fn lan(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 1, last)
}

fn addresses(hosts: &[HostScanResult]) -> HashSet<String> {
    hosts.iter().map(|host| host.address().to_string()).collect()
}

#[tokio::test]
async fn explicit_range_reports_exactly_the_answering_hosts() {
    let (scanner, probe) = MockProbe::new().with_up([lan(5), lan(10)]).into_scanner();
    let cancel = CancellationToken::new();

    let hosts = scanner
        .scan_subnet("127.0.0.1", Some("192.168.1.1-20"), false, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(hosts.len(), 2);
    assert!(hosts.iter().all(HostScanResult::is_up));
    assert_eq!(
        addresses(&hosts),
        HashSet::from(["192.168.1.5".to_string(), "192.168.1.10".to_string()])
    );
    assert_eq!(probe.pings.load(std::sync::atomic::Ordering::SeqCst), 20);
}

#[tokio::test]
async fn include_down_reports_every_enumerated_host() {
    let (scanner, _probe) = MockProbe::new().with_up([lan(5)]).into_scanner();
    let cancel = CancellationToken::new();

    let hosts = scanner
        .scan_subnet("127.0.0.1", Some("192.168.1.1-5"), true, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(hosts.len(), 5);
    assert_eq!(hosts.iter().filter(|host| host.is_up()).count(), 1);
    assert_eq!(hosts.iter().filter(|host| !host.is_up()).count(), 4);
}

#[tokio::test]
async fn answering_hosts_carry_name_and_mac_down_hosts_do_not() {
    let (scanner, probe) = MockProbe::new().with_up([lan(2)]).into_scanner();
    let cancel = CancellationToken::new();

    let hosts = scanner
        .scan_subnet("192.168.1.1", Some("192.168.1.1-3"), true, TIMEOUT, &cancel)
        .await
        .unwrap();

    for host in &hosts {
        if host.is_up() {
            assert_eq!(host.address(), "192.168.1.2");
            assert_eq!(host.hostname(), "host-192.168.1.2");
            assert_eq!(host.mac_address(), MOCK_MAC);
        } else {
            assert!(host.hostname().is_empty());
            assert!(host.mac_address().is_empty());
        }
    }
    assert_eq!(probe.mac_lookups.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(probe.name_lookups.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn mac_lookups_use_the_interface_address_as_source() {
    let interface = Ipv4Addr::new(192, 168, 1, 100);
    let (scanner, probe) = MockProbe::new().with_up([lan(3), lan(7)]).into_scanner();
    let cancel = CancellationToken::new();

    scanner
        .scan_subnet("192.168.1.100", Some("192.168.1.1-10"), false, TIMEOUT, &cancel)
        .await
        .unwrap();

    let mut requests = probe.mac_requests();
    requests.sort();
    assert_eq!(requests, vec![(lan(3), interface), (lan(7), interface)]);
}

#[tokio::test]
async fn failed_lookups_leave_answering_hosts_up_with_empty_fields() {
    let (scanner, probe) = MockProbe::new()
        .with_up([lan(4)])
        .with_failed_lookups()
        .into_scanner();
    let cancel = CancellationToken::new();

    let hosts = scanner
        .scan_subnet("192.168.1.1", Some("192.168.1.1-6"), false, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(hosts.len(), 1);
    assert!(hosts[0].is_up());
    assert_eq!(hosts[0].address(), "192.168.1.4");
    assert!(hosts[0].hostname().is_empty());
    assert!(hosts[0].mac_address().is_empty());
    assert_eq!(probe.mac_requests(), vec![(lan(4), lan(1))]);
}

#[tokio::test]
async fn missing_range_sweeps_the_interface_slash_24() {
    let (scanner, probe) = MockProbe::new()
        .with_up([Ipv4Addr::new(10, 1, 2, 1), Ipv4Addr::new(10, 1, 2, 254)])
        .into_scanner();
    let cancel = CancellationToken::new();

    let hosts = scanner
        .scan_subnet("10.1.2.77", None, true, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(hosts.len(), 254);
    assert_eq!(probe.pings.load(std::sync::atomic::Ordering::SeqCst), 254);
    let all = addresses(&hosts);
    assert!(all.contains("10.1.2.77"), "interface address is swept too");
    assert!(!all.contains("10.1.2.0"));
    assert!(!all.contains("10.1.2.255"));
    assert_eq!(hosts.iter().filter(|host| host.is_up()).count(), 2);
}

#[tokio::test]
async fn malformed_ranges_scan_nothing() {
    let (scanner, probe) = MockProbe::new().with_up([lan(15)]).into_scanner();
    let cancel = CancellationToken::new();

    for range in ["192.168.1.20-10", "192.168.1.1-192.168.2.5", "not-an-ip", ""] {
        let hosts = scanner
            .scan_subnet("192.168.1.1", Some(range), true, TIMEOUT, &cancel)
            .await
            .unwrap();
        assert!(hosts.is_empty(), "{range}");
    }

    let hosts = scanner
        .scan_subnet("bogus", None, true, TIMEOUT, &cancel)
        .await
        .unwrap();
    assert!(hosts.is_empty());
    assert_eq!(probe.total_calls(), 0);
}

#[tokio::test]
async fn oversized_host_list_is_rejected_before_probing() {
    let (scanner, probe) = MockProbe::new().into_scanner();
    let cancel = CancellationToken::new();
    let targets: Vec<Ipv4Addr> = (0..=MAX_HOSTS as u32)
        .map(|n| Ipv4Addr::from(0x0A00_0000 + n))
        .collect();

    let result = scanner
        .scan_hosts(targets, Ipv4Addr::UNSPECIFIED, false, TIMEOUT, &cancel)
        .await;

    assert_eq!(
        result,
        Err(ScanError::TooManyHosts {
            count: 513,
            max: 512
        })
    );
    assert_eq!(probe.total_calls(), 0);
}

#[tokio::test]
async fn host_list_at_the_limit_is_accepted() {
    let (scanner, probe) = MockProbe::new().into_scanner();
    let cancel = CancellationToken::new();
    let targets: Vec<Ipv4Addr> = (0..MAX_HOSTS as u32)
        .map(|n| Ipv4Addr::from(0x0A00_0000 + n))
        .collect();

    let hosts = scanner
        .scan_hosts(targets, Ipv4Addr::UNSPECIFIED, true, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(hosts.len(), MAX_HOSTS);
    assert_eq!(probe.pings.load(std::sync::atomic::Ordering::SeqCst), MAX_HOSTS);
}

#[tokio::test]
async fn concurrent_pings_never_exceed_the_worker_count() {
    let (scanner, probe) = MockProbe::new()
        .with_delay(Duration::from_millis(5))
        .into_scanner();
    let cancel = CancellationToken::new();

    scanner
        .scan_subnet("192.168.1.1", None, true, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert!(probe.peak() <= WORKER_COUNT, "peak was {}", probe.peak());
    assert!(probe.peak() > 1, "probes should overlap");
}
