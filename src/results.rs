use serde::{Deserialize, Serialize};

/// Outcome of a green hosting registry lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenHostingResult {
    pub is_green: bool,

    pub hosted_by: String,

    pub hosted_by_website: Option<String>,

    pub partner: bool,

    /// Why the lookup degraded to defaults, if it did
    pub error: Option<String>,
}

impl GreenHostingResult {
    /// Defaulted result carrying a failure description
    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

impl Default for GreenHostingResult {
    fn default() -> Self {
        Self {
            is_green: false,
            hosted_by: "Unknown".to_string(),
            hosted_by_website: None,
            partner: false,
            error: None,
        }
    }
}

/// Green hosting section of the response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenHostingReport {
    #[serde(flatten)]
    pub result: GreenHostingResult,

    pub domain: String,

    pub message: String,
}

impl GreenHostingReport {
    pub fn new(result: GreenHostingResult, domain: &str) -> Self {
        let message = if result.is_green {
            "🌱 This website is hosted green!"
        } else {
            "This website is not hosted green!"
        };
        Self {
            result,
            domain: domain.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Success,
    Improvement,
    Info,
}

/// A single improvement suggestion shown to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub savings: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
}

/// Category scores scaled to 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LighthouseScores {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
}

/// Display strings of the key timing metrics, `"N/A"` when unavailable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub fcp: String,
    pub speed_index: String,
    pub lcp: String,
    pub tti: String,
    pub total_blocking_time: String,
}

/// Consolidated analysis of one URL, as cached and returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub url: String,

    /// Grams of CO2e, formatted with three decimals
    pub emissions: String,

    pub data_transfer_size: u64,

    pub green_hosting: GreenHostingReport,

    pub lighthouse_scores: LighthouseScores,

    pub metrics: Metrics,

    pub improvements: Vec<Suggestion>,

    /// RFC 3339 time the analysis was assembled
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_green_hosting_report_shape() {
        let result = GreenHostingResult {
            is_green: true,
            hosted_by: "Acme".to_string(),
            hosted_by_website: Some("https://acme.test".to_string()),
            partner: false,
            error: None,
        };
        let report = GreenHostingReport::new(result, "example.com");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "isGreen": true,
                "hostedBy": "Acme",
                "hostedByWebsite": "https://acme.test",
                "partner": false,
                "error": null,
                "domain": "example.com",
                "message": "🌱 This website is hosted green!"
            })
        );
    }

    #[test]
    fn test_degraded_result_uses_defaults() {
        let result = GreenHostingResult::degraded("boom");
        assert!(!result.is_green);
        assert_eq!(result.hosted_by, "Unknown");
        assert_eq!(result.hosted_by_website, None);
        assert_eq!(result.error.as_deref(), Some("boom"));

        let report = GreenHostingReport::new(result, "example.com");
        assert_eq!(report.message, "This website is not hosted green!");
    }

    #[test]
    fn test_suggestion_type_serializes_lowercase() {
        let suggestion = Suggestion {
            title: "t".to_string(),
            description: "d".to_string(),
            savings: "N/A".to_string(),
            kind: SuggestionType::Improvement,
        };
        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["type"], "improvement");
    }
}
