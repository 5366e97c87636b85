use crate::error::AuditError;
use crate::report::AuditReport;
use async_trait::async_trait;
use url::Url;

/// Runs a page quality audit against a single URL
#[async_trait]
pub trait AuditRunner: Send + Sync {
    /// Audit `url` in a browser owned by this call and return the raw report.
    ///
    /// The browser is released before the returned future resolves, whether
    /// the audit succeeded or not.
    async fn run(&self, url: &Url) -> Result<AuditReport, AuditError>;
}
