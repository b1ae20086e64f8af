//! Prometheus metrics for channel mode processing.
//!
//! - `irc_channel_mode_changes_total{mode}` - Applied changes by letter
//! - `irc_channel_mode_errors_total{error}` - Rejections by kind
//! - `irc_command_total{command}` / `irc_command_duration_seconds{command}` -
//!   MODE/TMODE handling volume and latency

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Applied channel mode changes by letter.
pub static CHANNEL_MODE_CHANGES: OnceLock<IntCounterVec> = OnceLock::new();

/// Rejected mode letters by error kind.
pub static CHANNEL_MODE_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Mode letters skipped by the per-command parameter limit.
pub static MODE_PARAMS_THROTTLED: OnceLock<IntCounter> = OnceLock::new();

/// TMODE lines ignored because the channel TS was newer than ours.
pub static TMODE_TS_REJECTED: OnceLock<IntCounter> = OnceLock::new();

/// Commands processed by type (MODE, TMODE).
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command processing latency by command type.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; only the first call registers.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(metric = stringify!($metric), error = %e, "Failed to register metric");
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(metric = stringify!($metric), error = %e, "Failed to create metric");
                    }
                }
            }
        };
    }

    register!(CHANNEL_MODE_CHANGES, IntCounterVec::new(Opts::new("irc_channel_mode_changes_total", "Channel mode changes"), &["mode"]));
    register!(CHANNEL_MODE_ERRORS, IntCounterVec::new(Opts::new("irc_channel_mode_errors_total", "Rejected channel mode letters"), &["error"]));
    register!(MODE_PARAMS_THROTTLED, IntCounter::new("irc_mode_params_throttled_total", "Mode letters dropped by the parameter limit"));
    register!(TMODE_TS_REJECTED, IntCounter::new("irc_tmode_ts_rejected_total", "TMODE lines ignored for a newer channel TS"));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("irc_command_total", "IRC commands processed by type"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("irc_command_duration_seconds", "IRC command latency by type")
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        &["command"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a channel mode change.
#[inline]
pub fn record_mode_change(mode: char) {
    if let Some(c) = CHANNEL_MODE_CHANGES.get() {
        let mut buf = [0u8; 4];
        let label: &str = mode.encode_utf8(&mut buf);
        c.with_label_values(&[label]).inc();
    }
}

/// Record a rejected mode letter.
#[inline]
pub fn record_mode_error(error: &str) {
    if let Some(c) = CHANNEL_MODE_ERRORS.get() {
        c.with_label_values(&[error]).inc();
    }
}

#[inline]
pub fn record_param_throttled() {
    if let Some(c) = MODE_PARAMS_THROTTLED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_tmode_ts_rejected() {
    if let Some(c) = TMODE_TS_REJECTED.get() {
        c.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_lifecycle() {
        init();
        init();

        record_command("MODE", 0.001);
        record_mode_change('b');
        record_mode_error("unknown_mode");

        let output = gather_metrics();
        assert!(output.contains("irc_command_total"));
        assert!(output.contains("irc_channel_mode_changes_total"));
        assert!(output.contains("irc_channel_mode_errors_total"));
    }
}
