use super::browser::with_browser;
use super::runner::AuditRunner;
use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::report::AuditReport;
use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::timeout;
use url::Url;

/// Categories every audit is restricted to
pub const CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

/// Audits pages with the lighthouse CLI attached to a dedicated browser
pub struct LighthouseRunner {
    config: AuditConfig,
}

impl LighthouseRunner {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Command line for auditing `url` through the browser on `debug_port`.
    ///
    /// Configured extra flags come first, then the target URL and the fixed
    /// flags.
    pub fn command_args(&self, url: &Url, debug_port: u16) -> Vec<String> {
        let mut args = self.config.lighthouse_args.clone();
        args.extend([
            url.to_string(),
            format!("--port={}", debug_port),
            "--output=json".to_string(),
            "--output-path=stdout".to_string(),
            format!("--only-categories={}", CATEGORIES.join(",")),
            "--quiet".to_string(),
        ]);
        args
    }

    async fn audit(&self, url: &Url, debug_port: u16) -> Result<AuditReport, AuditError> {
        let started = std::time::Instant::now();
        ::log::info!("Running audit for {} on DevTools port {}", url, debug_port);

        let mut command = Command::new(&self.config.lighthouse_path);
        command
            .args(self.command_args(url, debug_port))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let limit = self.config.timeout();
        let output = match timeout(limit, command.output()).await {
            Ok(output) => output?,
            Err(_) => {
                ::log::error!("Timeout auditing: {}", url);
                return Err(AuditError::Timeout(limit));
            }
        };

        if !output.status.success() {
            return Err(AuditError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let report = parse_report(&output.stdout)?;
        ::log::debug!(
            "Audit of {} finished in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );
        Ok(report)
    }
}

#[async_trait]
impl AuditRunner for LighthouseRunner {
    async fn run(&self, url: &Url) -> Result<AuditReport, AuditError> {
        with_browser(&self.config, |debug_port| self.audit(url, debug_port)).await
    }
}

/// Parse the tool's JSON output, rejecting reports of pages that never loaded
pub fn parse_report(stdout: &[u8]) -> Result<AuditReport, AuditError> {
    let report: AuditReport = serde_json::from_slice::<Value>(stdout)?.into();
    match report.runtime_error() {
        Some(message) => Err(AuditError::Navigation(message)),
        None => Ok(report),
    }
}
