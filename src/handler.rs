use crate::audit::AuditRunner;
use crate::cache::ResultCache;
use crate::emissions;
use crate::error::AnalyzeError;
use crate::green::GreenCheck;
use crate::report::AuditReport;
use crate::results::{AnalysisResponse, GreenHostingReport, GreenHostingResult, LighthouseScores, Metrics};
use crate::suggestions;
use crate::utils::{percent, timestamp_now};
use crate::validate;
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates one analysis: validation, cache, green lookup, audit and
/// assembly of the consolidated response.
#[derive(Clone)]
pub struct Analyzer {
    cache: Arc<dyn ResultCache>,
    green: Arc<dyn GreenCheck>,
    auditor: Arc<dyn AuditRunner>,
    cache_ttl: Duration,
}

impl Analyzer {
    pub fn new(
        cache: Arc<dyn ResultCache>,
        green: Arc<dyn GreenCheck>,
        auditor: Arc<dyn AuditRunner>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            green,
            auditor,
            cache_ttl,
        }
    }

    /// Analyze the URL given as the raw `url` query parameter.
    ///
    /// Input errors are returned before any cache lookup or outbound call.
    /// Cached responses are returned unchanged, timestamp included. Only a
    /// completed analysis is cached. Spellings that canonicalize to the same
    /// key share an entry, so a hit echoes the `url` of the request that
    /// filled it.
    pub async fn analyze(&self, raw_url: Option<&str>) -> Result<AnalysisResponse, AnalyzeError> {
        let raw_url = match raw_url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(AnalyzeError::MissingUrl),
        };
        let url = validate::parse_target(raw_url).ok_or(AnalyzeError::InvalidUrl)?;

        let key = validate::cache_key(&url);
        if let Some(cached) = self.cache.get(&key).await {
            ::log::info!("Serving cached analysis for {}", key);
            return Ok(cached);
        }

        let domain = url.host_str().unwrap_or_default().to_string();
        ::log::info!("Analyzing {} (domain {})", raw_url, domain);

        let (green, audit) = tokio::join!(self.green.check(&domain), self.auditor.run(&url));
        let report = audit.inspect_err(|e| {
            ::log::error!("Error analyzing website {}: {}", raw_url, e);
        })?;

        let response = assemble(raw_url, &domain, &report, green);
        self.cache.set(&key, response.clone(), self.cache_ttl).await;
        ::log::info!(
            "Finished analysis of {}: {} bytes, {} g CO2e",
            raw_url,
            response.data_transfer_size,
            response.emissions
        );
        Ok(response)
    }
}

/// Build the response from an audit report and a hosting lookup
pub fn assemble(
    url: &str,
    domain: &str,
    report: &AuditReport,
    green: GreenHostingResult,
) -> AnalysisResponse {
    let data_transfer_size = report.total_byte_weight();
    let improvements = suggestions::aggregate(report, &green);

    AnalysisResponse {
        url: url.to_string(),
        emissions: emissions::estimate(data_transfer_size),
        data_transfer_size,
        green_hosting: GreenHostingReport::new(green, domain),
        lighthouse_scores: scores(report),
        metrics: metrics(report),
        improvements,
        timestamp: timestamp_now(),
    }
}

fn scores(report: &AuditReport) -> LighthouseScores {
    LighthouseScores {
        performance: percent(report.category_score("performance")),
        accessibility: percent(report.category_score("accessibility")),
        best_practices: percent(report.category_score("best-practices")),
        seo: percent(report.category_score("seo")),
    }
}

fn metrics(report: &AuditReport) -> Metrics {
    Metrics {
        fcp: report.display_value("first-contentful-paint"),
        speed_index: report.display_value("speed-index"),
        lcp: report.display_value("largest-contentful-paint"),
        tti: report.display_value("interactive"),
        total_blocking_time: report.display_value("total-blocking-time"),
    }
}
