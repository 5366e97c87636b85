use crate::config::GreenCheckConfig;
use crate::error::GreenCheckError;
use crate::report::FieldAccess;
use crate::results::GreenHostingResult;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;

/// Lookup of a domain in a green hosting registry.
///
/// Implementations never fail: problems are reported through
/// [`GreenHostingResult::error`] with every other field at its default.
#[async_trait]
pub trait GreenCheck: Send + Sync {
    async fn check(&self, domain: &str) -> GreenHostingResult;
}

/// Client for the Green Web Foundation greencheck API
pub struct GreenWebClient {
    http: Client,
    base_url: String,
}

impl GreenWebClient {
    pub fn new(config: &GreenCheckConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, domain: &str) -> String {
        format!("{}/greencheck/{}", self.base_url, domain)
    }

    async fn fetch(&self, domain: &str) -> Result<GreenHostingResult, GreenCheckError> {
        let response = self
            .http
            .get(self.lookup_url(domain))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GreenCheckError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(parse_registry_body(&body))
    }
}

#[async_trait]
impl GreenCheck for GreenWebClient {
    async fn check(&self, domain: &str) -> GreenHostingResult {
        match self.fetch(domain).await {
            Ok(result) => {
                ::log::debug!(
                    "Green check for {}: green={} hosted by {}",
                    domain,
                    result.is_green,
                    result.hosted_by
                );
                result
            }
            Err(e) => {
                ::log::warn!("Error checking green hosting status for {}: {}", domain, e);
                GreenHostingResult::degraded(e.to_string())
            }
        }
    }
}

/// Normalize a registry response into a [`GreenHostingResult`]
pub fn parse_registry_body(body: &Value) -> GreenHostingResult {
    let non_empty = |key: &str| {
        body.field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    GreenHostingResult {
        is_green: body.bool_or("green", false),
        hosted_by: non_empty("hostedby").unwrap_or_else(|| "Unknown".to_string()),
        hosted_by_website: non_empty("hostedbywebsite"),
        partner: body.bool_or("partner", false),
        error: None,
    }
}
