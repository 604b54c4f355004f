//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MetricsConfig;

static DOCUMENT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"/[0-9a-f]{32}(/|$)").unwrap());

static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap()
});

static MAIL_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/[^/]+@[^/]+(/|$)").unwrap());

const MAX_PATH_LABEL_LENGTH: usize = 50;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the global Prometheus recorder when metrics are enabled
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("capstone_hub_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!(path = %config.path, "Prometheus metrics initialized");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Router serving the rendered metrics at `path`
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Collapse ids and mail addresses so label cardinality stays bounded
fn sanitize_path(path: &str) -> String {
    let path = UUID.replace_all(path, "{id}");
    let path = DOCUMENT_ID.replace_all(&path, "/{id}$1");
    let path = MAIL_SEGMENT.replace_all(&path, "/{mail}$1");

    path.chars().take(MAX_PATH_LABEL_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_document_id() {
        assert_eq!(
            sanitize_path("/team/0123456789abcdef0123456789abcdef"),
            "/team/{id}"
        );
        assert_eq!(
            sanitize_path("/submittedFile/approve/0123456789abcdef0123456789abcdef"),
            "/submittedFile/approve/{id}"
        );
    }

    #[test]
    fn test_sanitize_path_uuid() {
        assert_eq!(
            sanitize_path("/team/550e8400-e29b-41d4-a716-446655440000"),
            "/team/{id}"
        );
    }

    #[test]
    fn test_sanitize_path_mail() {
        assert_eq!(
            sanitize_path("/team/myteam/alice@cse.bubt.edu.bd"),
            "/team/myteam/{mail}"
        );
    }

    #[test]
    fn test_sanitize_path_no_id() {
        assert_eq!(sanitize_path("/health"), "/health");
        assert_eq!(sanitize_path("/team/by-teacher"), "/team/by-teacher");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/very/long/path/that/exceeds/the/maximum/allowed/length/for/metrics";
        assert!(sanitize_path(path).len() <= MAX_PATH_LABEL_LENGTH);
    }
}
