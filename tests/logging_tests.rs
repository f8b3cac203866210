//! Log output of the admission guard.
//!
//! Kept in its own test binary because a logger can only be installed once
//! per process.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use log::{Level, LevelFilter, Log, Metadata, Record};
use x402_admission_guard::{AdmissionGuard, GuardConfig, LossMetrics, TransactionRequest};

struct CaptureLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger { lines: Mutex::new(Vec::new()) };

#[test]
fn every_evaluation_is_logged_and_denials_warn() {
    log::set_logger(&LOGGER).expect("install logger");
    log::set_max_level(LevelFilter::Trace);

    let guard = AdmissionGuard::new(GuardConfig::default(), Arc::new(LossMetrics::new())).expect("valid config");
    let now = Utc::now();
    let req = TransactionRequest::new(b"msg".to_vec(), b"sig".to_vec(), b"pub".to_vec(), 12_500, 75, now);

    guard.evaluate(&req, 60, Duration::from_secs(1), now, 0.1, true);
    guard.evaluate(&req, 60, Duration::from_secs(1), now, 0.1, false);

    let lines = LOGGER.lines.lock().expect("log lines");
    let evaluating = lines
        .iter()
        .filter(|(level, msg)| *level == Level::Debug && msg.starts_with("evaluating "))
        .count();
    assert_eq!(evaluating, 2);
    assert!(lines
        .iter()
        .any(|(level, msg)| *level == Level::Warn && msg.contains("reasons=bridge_rejected")));
}
