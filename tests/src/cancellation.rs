use std::net::Ipv4Addr;
use std::sync::atomic::Ordering;
use std::time::Duration;

use netsweep_common::error::ScanError;
use tokio_util::sync::CancellationToken;

use crate::mock::MockProbe;

const TIMEOUT: Duration = Duration::from_millis(500);
const UNWIND_LIMIT: Duration = Duration::from_secs(5);

fn cancel_after(delay: Duration) -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        trigger.cancel();
    });
    cancel
}

#[tokio::test]
async fn cancelled_sweep_fails_without_partial_results() {
    let (scanner, _probe) = MockProbe::new()
        .with_up([Ipv4Addr::new(192, 168, 1, 1)])
        .hanging()
        .into_scanner();
    let cancel = cancel_after(Duration::from_millis(20));

    let result = tokio::time::timeout(
        UNWIND_LIMIT,
        scanner.scan_subnet("192.168.1.1", None, true, TIMEOUT, &cancel),
    )
    .await
    .expect("sweep should unwind promptly after cancellation");

    assert_eq!(result, Err(ScanError::Cancelled));
}

#[tokio::test]
async fn cancelled_port_scan_fails_without_partial_results() {
    let target = Ipv4Addr::new(10, 0, 0, 1);
    let (scanner, _probe) = MockProbe::new()
        .with_open_ports(target, [22])
        .hanging()
        .into_scanner();
    let cancel = cancel_after(Duration::from_millis(20));

    let result = tokio::time::timeout(
        UNWIND_LIMIT,
        scanner.scan_ports("10.0.0.1", Some("1-500"), TIMEOUT, &cancel),
    )
    .await
    .expect("port scan should unwind promptly after cancellation");

    assert_eq!(result, Err(ScanError::Cancelled));
}

#[tokio::test]
async fn already_cancelled_token_sends_no_probe() {
    let (scanner, probe) = MockProbe::new().into_scanner();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let hosts = scanner
        .scan_subnet("192.168.1.1", Some("192.168.1.1-10"), true, TIMEOUT, &cancel)
        .await;
    let ports = scanner
        .scan_ports("192.168.1.1", Some("1-10"), TIMEOUT, &cancel)
        .await;

    assert_eq!(hosts, Err(ScanError::Cancelled));
    assert_eq!(ports, Err(ScanError::Cancelled));
    assert_eq!(probe.total_calls(), 0);
}

#[tokio::test]
async fn no_new_probes_start_after_cancellation() {
    let (scanner, probe) = MockProbe::new()
        .with_delay(Duration::from_millis(20))
        .into_scanner();
    let cancel = cancel_after(Duration::from_millis(30));

    let result = scanner
        .scan_ports("10.0.0.1", Some("1-1000"), TIMEOUT, &cancel)
        .await;
    assert_eq!(result, Err(ScanError::Cancelled));

    let started: usize = probe.connects.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(probe.connects.load(Ordering::SeqCst), started);
    assert!(started < 1000, "cancellation should stop the sweep early, {started} probes ran");
}
