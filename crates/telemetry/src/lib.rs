//! Logging and in-process metrics for storefront tools
//!
//! - Structured logging with `tracing`, filtered by `RUST_LOG`
//! - A session id shared by every log line of one run
//! - Counters and latency histograms, exported as JSON

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use uuid::Uuid;

static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

static METRICS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Initialize logging with default settings
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize logging with custom settings.
///
/// `RUST_LOG` wins over `config.log_level`. Logs go to stderr so that
/// command output on stdout stays machine-readable.
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (compact, json) = match config.format {
        LogFormat::Compact => (
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .with_ansi(config.ansi)
                    .compact(),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .json(),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;

    METRICS_ENABLED.store(config.metrics_enabled, Ordering::Relaxed);

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Current session id
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Log line layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Line layout
    pub format: LogFormat,
    /// Include the event target
    pub show_target: bool,
    /// Colorize compact output
    pub ansi: bool,
    /// Record counters and timers
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: LogFormat::Compact,
            show_target: false,
            ansi: true,
            metrics_enabled: true,
        }
    }
}

impl TelemetryConfig {
    /// Debug-level logging for the storefront crates
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            log_level: "warn,storefront_search=debug,storefront_api_client=debug,storefront_core=debug,catalog_search=debug"
                .to_string(),
            show_target: true,
            ..Self::default()
        }
    }

    /// Set the line layout
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Counters and histograms for one process
pub struct MetricsRegistry {
    counters: RwLock<HashMap<String, AtomicU64>>,
    histograms: RwLock<HashMap<String, Vec<f64>>>,
    start_time: Instant,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
            histograms: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Increment a counter
    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    /// Increment a counter by a specific amount
    pub fn increment_by(&self, name: &str, value: u64) {
        if !METRICS_ENABLED.load(Ordering::Relaxed) {
            return;
        }
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(counter) = counters.get(name) {
            counter.fetch_add(value, Ordering::Relaxed);
        } else {
            drop(counters);
            self.counters
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(name.to_string())
                .or_insert_with(|| AtomicU64::new(0))
                .fetch_add(value, Ordering::Relaxed);
        }
    }

    /// Current counter value
    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    /// Record a histogram value
    pub fn histogram(&self, name: &str, value: f64) {
        if !METRICS_ENABLED.load(Ordering::Relaxed) {
            return;
        }
        self.histograms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    /// Summary of one histogram, if anything was recorded
    pub fn histogram_stats(&self, name: &str) -> Option<HistogramStats> {
        self.histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|values| HistogramStats::from_values(values))
    }

    /// Uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let counters: HashMap<String, u64> = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.load(Ordering::Relaxed)))
            .collect();

        let histograms: HashMap<String, HistogramStats> = self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), HistogramStats::from_values(v)))
            .collect();

        serde_json::json!({
            "session_id": session_id(),
            "exported_at": Utc::now(),
            "uptime_secs": self.uptime_secs(),
            "counters": counters,
            "histograms": histograms,
        })
    }
}

/// Histogram statistics, in the unit recorded (milliseconds for timers)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramStats {
    /// Samples
    pub count: usize,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
}

impl HistogramStats {
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                p50: 0.0,
                p95: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();

        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum / count as f64,
            p50: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
        }
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Process-wide metrics registry
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

/// Records its elapsed time (ms) into a histogram once, on `stop` or drop.
pub struct Timer {
    name: String,
    start: Instant,
    recorded: bool,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(mut self) -> Duration {
        self.record()
    }

    fn record(&mut self) -> Duration {
        let duration = self.start.elapsed();
        if !self.recorded {
            self.recorded = true;
            metrics().histogram(&self.name, duration.as_secs_f64() * 1000.0);
            tracing::debug!(
                metric = %self.name,
                duration_ms = duration.as_millis(),
                "Timer completed"
            );
        }
        duration
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.record();
    }
}

/// A named, timestamped record of something the user did
#[derive(Debug, Serialize)]
pub struct Event {
    /// When it happened
    pub timestamp: DateTime<Utc>,
    /// Session it belongs to
    pub session_id: String,
    /// Event kind, e.g. `search`
    pub event_type: String,
    /// Free-form details
    pub data: serde_json::Value,
}

impl Event {
    /// New event stamped with the current time and session
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: session_id().to_string(),
            event_type: event_type.into(),
            data,
        }
    }

    /// Emit the event as an info log line and count it
    pub fn log(&self) {
        metrics().increment(&format!("events.{}", self.event_type));
        tracing::info!(
            event_type = %self.event_type,
            data = %self.data,
            "Event recorded"
        );
    }
}
