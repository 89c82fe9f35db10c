use std::net::Ipv4Addr;
use std::sync::atomic::Ordering;
use std::time::Duration;

use netsweep_common::config::{MAX_PORTS, WORKER_COUNT};
use netsweep_common::error::ScanError;
use netsweep_common::network::ports;
use tokio_util::sync::CancellationToken;

use crate::mock::MockProbe;

const TIMEOUT: Duration = Duration::from_millis(500);
const TARGET: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 5);

#[tokio::test]
async fn reports_exactly_the_open_ports() {
    let (scanner, probe) = MockProbe::new()
        .with_open_ports(TARGET, [80, 443])
        .into_scanner();
    let cancel = CancellationToken::new();

    let result = scanner
        .scan_ports("192.168.1.5", Some("80,443,8080"), TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(result.address(), "192.168.1.5");
    assert_eq!(result.open_ports(), &[80, 443]);
    assert_eq!(probe.connects.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn open_ports_are_ascending_even_when_found_in_reverse() {
    let open: Vec<u16> = vec![3, 7, 11, 12, 19, 40];
    let (scanner, _probe) = MockProbe::new()
        .with_open_ports(TARGET, open.clone())
        .with_reverse_latency()
        .into_scanner();
    let cancel = CancellationToken::new();

    let result = scanner
        .scan_ports("192.168.1.5", Some("1-40"), TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(result.open_ports(), open.as_slice());
}

#[tokio::test]
async fn no_port_expression_probes_the_default_list() {
    let (scanner, probe) = MockProbe::new()
        .with_open_ports(TARGET, [22, 502, 8080])
        .into_scanner();
    let cancel = CancellationToken::new();

    let result = scanner
        .scan_ports("192.168.1.5", None, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(result.open_ports(), &[22, 502]);
    assert_eq!(
        probe.connects.load(Ordering::SeqCst),
        ports::default_ports().len()
    );
}

#[tokio::test]
async fn duplicate_and_invalid_tokens_are_probed_once_or_not_at_all() {
    let (scanner, probe) = MockProbe::new()
        .with_open_ports(TARGET, [80, 81])
        .into_scanner();
    let cancel = CancellationToken::new();

    let result = scanner
        .scan_ports("192.168.1.5", Some("80, 80, 80-82, http, 0, 70000"), TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(result.open_ports(), &[80, 81]);
    assert_eq!(probe.connects.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn oversized_port_set_is_rejected_before_connecting() {
    let (scanner, probe) = MockProbe::new().into_scanner();
    let cancel = CancellationToken::new();

    let result = scanner
        .scan_ports("192.168.1.5", Some("1-1001"), TIMEOUT, &cancel)
        .await;

    assert_eq!(
        result,
        Err(ScanError::TooManyPorts {
            count: MAX_PORTS + 1,
            max: MAX_PORTS
        })
    );
    assert_eq!(probe.total_calls(), 0);
}

#[tokio::test]
async fn port_set_at_the_limit_is_accepted() {
    let (scanner, probe) = MockProbe::new().into_scanner();
    let cancel = CancellationToken::new();

    let result = scanner
        .scan_ports("192.168.1.5", Some("1-1000"), TIMEOUT, &cancel)
        .await
        .unwrap();

    assert!(result.open_ports().is_empty());
    assert_eq!(probe.connects.load(Ordering::SeqCst), MAX_PORTS);
}

#[tokio::test]
async fn unparseable_address_yields_no_open_ports() {
    let (scanner, probe) = MockProbe::new().into_scanner();
    let cancel = CancellationToken::new();

    let result = scanner
        .scan_ports("printer.local", Some("80"), TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(result.address(), "printer.local");
    assert!(result.open_ports().is_empty());
    assert_eq!(probe.total_calls(), 0);
}

#[tokio::test]
async fn concurrent_connects_never_exceed_the_worker_count() {
    let (scanner, probe) = MockProbe::new()
        .with_delay(Duration::from_millis(5))
        .into_scanner();
    let cancel = CancellationToken::new();

    scanner
        .scan_ports("192.168.1.5", Some("1-300"), TIMEOUT, &cancel)
        .await
        .unwrap();

    assert!(probe.peak() <= WORKER_COUNT, "peak was {}", probe.peak());
    assert!(probe.peak() > 1, "connects should overlap");
}
