//! Stub collaborators and fixtures shared by the unit tests.

use crate::audit::AuditRunner;
use crate::error::AuditError;
use crate::green::GreenCheck;
use crate::handler::assemble;
use crate::report::AuditReport;
use crate::results::{AnalysisResponse, GreenHostingResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use url::Url;

/// Report with 1,000,000 transferred bytes and two opportunity audits
pub fn sample_report() -> AuditReport {
    AuditReport::new(json!({
        "categories": {
            "performance": { "score": 0.93 },
            "accessibility": { "score": 0.88 },
            "best-practices": { "score": 1 }
        },
        "audits": {
            "total-byte-weight": { "numericValue": 1_000_000, "displayValue": "Total size was 977 KiB" },
            "first-contentful-paint": { "displayValue": "0.8 s" },
            "speed-index": { "displayValue": "1.4 s" },
            "largest-contentful-paint": { "displayValue": "1.9 s" },
            "total-blocking-time": { "displayValue": "40 ms" },
            "unused-javascript": {
                "title": "Reduce unused JavaScript",
                "description": "Reduce unused JavaScript and defer loading scripts.",
                "details": { "type": "opportunity", "items": [ { "wastedMs": 300 }, { "wastedMs": 120 } ] }
            },
            "modern-image-formats": {
                "title": "Serve images in modern formats",
                "description": "WebP and AVIF often compress better.",
                "details": { "type": "opportunity", "items": [ { "wastedBytes": 5000 } ] }
            }
        }
    }))
}

pub fn sample_response(url: &str) -> AnalysisResponse {
    assemble(url, "example.com", &sample_report(), GreenHostingResult::default())
}

/// Audit runner returning a fixed report, or failing, and counting calls
pub struct StubAuditor {
    report: Option<AuditReport>,
    pub calls: AtomicUsize,
}

impl StubAuditor {
    pub fn with_report(report: AuditReport) -> Self {
        Self {
            report: Some(report),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            report: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuditRunner for StubAuditor {
    async fn run(&self, _url: &Url) -> Result<AuditReport, AuditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.report
            .clone()
            .ok_or_else(|| AuditError::Navigation("net::ERR_NAME_NOT_RESOLVED".to_string()))
    }
}

/// Green lookup returning a fixed result and recording queried domains
pub struct StubGreen {
    result: GreenHostingResult,
    pub calls: AtomicUsize,
    pub domains: Mutex<Vec<String>>,
}

impl StubGreen {
    fn new(result: GreenHostingResult) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            domains: Mutex::new(Vec::new()),
        }
    }

    pub fn green(hosted_by: &str) -> Self {
        Self::new(GreenHostingResult {
            is_green: true,
            hosted_by: hosted_by.to_string(),
            ..GreenHostingResult::default()
        })
    }

    pub fn grey(hosted_by: &str) -> Self {
        Self::new(GreenHostingResult {
            hosted_by: hosted_by.to_string(),
            ..GreenHostingResult::default()
        })
    }

    pub fn degraded(error: &str) -> Self {
        Self::new(GreenHostingResult::degraded(error))
    }
}

#[async_trait]
impl GreenCheck for StubGreen {
    async fn check(&self, domain: &str) -> GreenHostingResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.domains.lock().await.push(domain.to_string());
        self.result.clone()
    }
}
