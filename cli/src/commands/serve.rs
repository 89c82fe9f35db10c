//! HTTP front-end for the scanner.
//!
//! Every request gets its own cancellation token guarded by the handler: when
//! the client disconnects the handler future is dropped and the scan stops.

use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use netsweep_common::config::{self, Config, DEFAULT_TIMEOUT_MS};
use netsweep_common::error::ScanError;
use netsweep_common::network::host::{HostScanResult, PortScanResult};
use netsweep_common::network::interface::NetworkInterfaceInfo;
use netsweep_common::probe::NetworkProbe;
use netsweep_core::{Scanner, system};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::commands;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubnetQuery {
    interface_ip: String,
    range: Option<String>,
    #[serde(default)]
    include_down: bool,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortsQuery {
    ip: String,
    range: Option<String>,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// A blank `range=` means no range was given.
fn explicit_range(range: Option<&str>) -> Option<&str> {
    range.filter(|text| !text.trim().is_empty())
}

#[derive(Debug)]
enum ApiError {
    Scan(ScanError),
    Internal(anyhow::Error),
}

impl From<ScanError> for ApiError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Scan(e) if e.is_input_too_large() => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Scan(ScanError::Cancelled) => {
                (StatusCode::REQUEST_TIMEOUT, ScanError::Cancelled.to_string())
            }
            Self::Scan(e) => {
                error!("Scan failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            Self::Internal(e) => {
                error!("Request failed: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub async fn serve(bind: SocketAddr, cfg: &Config) -> anyhow::Result<()> {
    let app: Router = router(commands::system_scanner(cfg)).layer(CorsLayer::permissive());

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {bind}"))?;
    info!("Scanner API listening on http://{}", listener.local_addr()?);
    info!("Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server shutdown complete");
    Ok(())
}

pub fn router<P: NetworkProbe + 'static>(scanner: Scanner<P>) -> Router {
    Router::new()
        .route("/api/scanner/interfaces", get(list_interfaces))
        .route("/api/scanner/subnet", get(scan_subnet::<P>))
        .route("/api/scanner/ports", get(scan_ports::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(scanner)
}

async fn list_interfaces() -> Result<Json<Vec<NetworkInterfaceInfo>>, ApiError> {
    let infos: Vec<NetworkInterfaceInfo> = tokio::task::spawn_blocking(system::list_interfaces)
        .await
        .context("interface listing task failed")??;
    Ok(Json(infos))
}

async fn scan_subnet<P: NetworkProbe + 'static>(
    State(scanner): State<Scanner<P>>,
    Query(query): Query<SubnetQuery>,
) -> Result<Json<Vec<HostScanResult>>, ApiError> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let hosts: Vec<HostScanResult> = scanner
        .scan_subnet(
            &query.interface_ip,
            explicit_range(query.range.as_deref()),
            query.include_down,
            config::probe_timeout(query.timeout_ms),
            &cancel,
        )
        .await?;
    Ok(Json(hosts))
}

async fn scan_ports<P: NetworkProbe + 'static>(
    State(scanner): State<Scanner<P>>,
    Query(query): Query<PortsQuery>,
) -> Result<Json<PortScanResult>, ApiError> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let result: PortScanResult = scanner
        .scan_ports(
            &query.ip,
            explicit_range(query.range.as_deref()),
            config::probe_timeout(query.timeout_ms),
            &cancel,
        )
        .await?;
    Ok(Json(result))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(e) => {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
