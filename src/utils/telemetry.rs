// file: src/utils/telemetry.rs
// description: health checks and operation timing for the setup probes
// reference: production observability patterns

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Result of probing one collaborator (model artifact, OCR binary, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub component: String,
    pub status: HealthStatus,
    pub message: Option<String>,
    pub probe_time_ms: u64,
}

impl HealthCheck {
    pub fn healthy(component: &str, probe_time: Duration) -> Self {
        Self {
            component: component.to_string(),
            status: HealthStatus::Healthy,
            message: None,
            probe_time_ms: probe_time.as_millis() as u64,
        }
    }

    pub fn degraded(component: &str, message: String, probe_time: Duration) -> Self {
        Self {
            component: component.to_string(),
            status: HealthStatus::Degraded,
            message: Some(message),
            probe_time_ms: probe_time.as_millis() as u64,
        }
    }

    pub fn unhealthy(component: &str, message: String, probe_time: Duration) -> Self {
        Self {
            component: component.to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(message),
            probe_time_ms: probe_time.as_millis() as u64,
        }
    }

    /// Time a probe closure; Ok becomes healthy (with the returned detail as
    /// the message), Err becomes unhealthy.
    pub fn run<F>(component: &str, probe: F) -> Self
    where
        F: FnOnce() -> std::result::Result<String, String>,
    {
        let start = Instant::now();
        match probe() {
            Ok(detail) => {
                let mut check = Self::healthy(component, start.elapsed());
                if !detail.is_empty() {
                    check.message = Some(detail);
                }
                check
            }
            Err(message) => Self::unhealthy(component, message, start.elapsed()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub checks: Vec<HealthCheck>,
    pub timestamp: u64,
    pub version: String,
}

impl HealthReport {
    pub fn new(checks: Vec<HealthCheck>, version: String) -> Self {
        let overall_status = if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_secs();

        Self {
            overall_status,
            checks,
            timestamp,
            version,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.overall_status == HealthStatus::Healthy
    }

    pub fn format(&self) -> String {
        let mut output = format!(
            "{} Setup health: {:?} (doc_entities {})\n\
             Timestamp: {}\n\n",
            status_icon(&self.overall_status),
            self.overall_status,
            self.version,
            chrono::DateTime::from_timestamp(self.timestamp as i64, 0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );

        for check in &self.checks {
            output.push_str(&format!(
                "{} {} ({:?}) - {}ms",
                status_icon(&check.status),
                check.component,
                check.status,
                check.probe_time_ms
            ));

            if let Some(ref msg) = check.message {
                output.push_str(&format!("\n  {}", msg));
            }

            output.push('\n');
        }

        output
    }
}

fn status_icon(status: &HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "✓",
        HealthStatus::Degraded => "⚠",
        HealthStatus::Unhealthy => "✗",
    }
}

/// Operation timer for performance tracking
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        info!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_creation() {
        let check = HealthCheck::healthy("ner-model", Duration::from_millis(50));
        assert_eq!(check.component, "ner-model");
        assert_eq!(check.status, HealthStatus::Healthy);
        assert_eq!(check.probe_time_ms, 50);
    }

    #[test]
    fn test_health_check_run() {
        let ok = HealthCheck::run("ocr-binary", || Ok("tesseract 5.3.4".to_string()));
        assert_eq!(ok.status, HealthStatus::Healthy);
        assert_eq!(ok.message.as_deref(), Some("tesseract 5.3.4"));

        let bad = HealthCheck::run("ner-model", || Err("model.onnx not found".to_string()));
        assert_eq!(bad.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn test_health_report_overall_status() {
        let checks = vec![
            HealthCheck::healthy("ner-model", Duration::from_millis(10)),
            HealthCheck::degraded(
                "ocr-binary",
                "old version".to_string(),
                Duration::from_millis(100),
            ),
        ];

        let report = HealthReport::new(checks, "0.1.0".to_string());
        assert_eq!(report.overall_status, HealthStatus::Degraded);
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_operation_timer() {
        let timer = OperationTimer::new("probe");
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.finish();
        assert!(elapsed >= Duration::from_millis(10));
    }
}
