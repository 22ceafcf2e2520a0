use serde::Serialize;
use std::sync::Arc;

use super::browsers::{self, BrowserAudit};
use super::dns;
use super::runner::{CommandRunner, SystemRunner};
use super::services;
use crate::common::config::CleanupConfig;
use crate::common::errors::{CleanupError, ErrorKind};
use crate::common::oplog::{FailureLog, FileLog};
use crate::platform::{self, PlatformKind};

/// Outcome of a single cleanup operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    pub succeeded: bool,
    pub message: String,
    /// Per-item failure descriptions (per browser, per service), never
    /// collapsed into one opaque message.
    pub errors: Vec<String>,
    /// Failure classification, when the operation failed outright.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        OperationResult {
            succeeded: true,
            message: message.into(),
            errors: Vec::new(),
            kind: None,
        }
    }

    pub fn failure(error: &CleanupError) -> Self {
        OperationResult {
            succeeded: false,
            message: error.to_string(),
            errors: Vec::new(),
            kind: Some(error.kind()),
        }
    }
}

/// The privacy-cleanup engine: platform facts, read-only configuration,
/// and the injected process/log seams, behind the three operations.
///
/// Operations run synchronously on the calling thread and share no state
/// with each other beyond the log sink and the configuration tables.
pub struct CleanupEngine {
    platform: PlatformKind,
    elevated: bool,
    config: CleanupConfig,
    runner: Box<dyn CommandRunner>,
    log: Arc<dyn FailureLog>,
}

impl CleanupEngine {
    /// Engine wired to the real machine: detected platform and elevation,
    /// system process runner, file-backed failure log.
    pub fn new(config: CleanupConfig) -> Self {
        let log = Arc::new(FileLog::new(config.log_path.clone()));
        CleanupEngine {
            platform: PlatformKind::current(),
            elevated: platform::is_elevated(),
            config,
            runner: Box::new(SystemRunner),
            log,
        }
    }

    /// Engine with every collaborator supplied by the caller. This is the
    /// seam tests use to simulate platforms, substitute command runners,
    /// and capture log output.
    pub fn with_parts(
        platform: PlatformKind,
        elevated: bool,
        config: CleanupConfig,
        runner: Box<dyn CommandRunner>,
        log: Arc<dyn FailureLog>,
    ) -> Self {
        CleanupEngine {
            platform,
            elevated,
            config,
            runner,
            log,
        }
    }

    pub fn platform(&self) -> &PlatformKind {
        &self.platform
    }

    pub fn is_elevated(&self) -> bool {
        self.elevated
    }

    pub fn config(&self) -> &CleanupConfig {
        &self.config
    }

    /// Flush the OS resolver cache. Never retried automatically; the
    /// caller decides whether to retry.
    pub fn flush_dns(&self) -> OperationResult {
        match dns::flush_dns(&self.platform, self.elevated, self.runner.as_ref()) {
            Ok(()) => OperationResult::success("DNS cache flushed successfully."),
            Err(e) => {
                self.log.append(&format!("DNS flush error: {}", e));
                OperationResult::failure(&e)
            }
        }
    }

    /// Delete known browser artifacts. An empty vec is full success.
    pub fn clear_browser_data(&self) -> Vec<String> {
        browsers::clear_browser_data(&self.config, self.log.as_ref())
    }

    /// Measure what `clear_browser_data` would remove, without mutating
    /// anything.
    pub fn audit_browsers(&self) -> Vec<BrowserAudit> {
        browsers::audit_browsers(&self.config)
    }

    /// Revoke cached desktop-service credentials.
    pub fn sign_out_services(&self) -> Vec<String> {
        services::sign_out_services(
            &self.config,
            &self.platform,
            self.runner.as_ref(),
            self.log.as_ref(),
        )
    }

    /// Run every operation in sequence: DNS flush, browser data, services.
    pub fn run_all(&self) -> CleanupReport {
        let dns = self.flush_dns();
        let browser_errors = self.clear_browser_data();
        let service_errors = self.sign_out_services();
        CleanupReport {
            dns,
            browser_errors,
            service_errors,
        }
    }
}

/// Combined outcome of `run_all`.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupReport {
    pub dns: OperationResult,
    pub browser_errors: Vec<String>,
    pub service_errors: Vec<String>,
}

impl CleanupReport {
    /// True when every operation finished without a single failure.
    pub fn is_clean(&self) -> bool {
        self.dns.succeeded && self.browser_errors.is_empty() && self.service_errors.is_empty()
    }

    /// The combined textual report, one line per outcome.
    pub fn render(&self) -> String {
        let mut lines = vec![self.dns.message.clone()];
        if self.browser_errors.is_empty() {
            lines.push("Browser data cleared successfully.".to_string());
        } else {
            lines.extend(self.browser_errors.iter().cloned());
        }
        if self.service_errors.is_empty() {
            lines.push("Signed out of services successfully.".to_string());
        } else {
            lines.extend(self.service_errors.iter().cloned());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_result_has_no_kind() {
        let result = OperationResult::success("done");
        assert!(result.succeeded);
        assert!(result.kind.is_none());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn failure_result_carries_the_kind() {
        let err = CleanupError::UnsupportedPlatform("freebsd".into());
        let result = OperationResult::failure(&err);
        assert!(!result.succeeded);
        assert_eq!(result.kind, Some(ErrorKind::UnsupportedPlatform));
        assert!(result.message.contains("freebsd"));
    }

    #[test]
    fn report_renders_one_line_per_outcome() {
        let report = CleanupReport {
            dns: OperationResult::success("DNS cache flushed successfully."),
            browser_errors: vec!["firefox: Cannot remove '/p': denied".to_string()],
            service_errors: Vec::new(),
        };
        let rendered = report.render();
        assert!(!report.is_clean());
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("firefox"));
        assert!(rendered.contains("Signed out of services successfully."));
    }
}
