// Re-export modules
pub mod audit;
pub mod cache;
pub mod config;
pub mod emissions;
pub mod error;
pub mod green;
pub mod handler;
pub mod report;
pub mod results;
pub mod server;
pub mod suggestions;
pub mod utils;
pub mod validate;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use error::{AnalyzeError, AuditError};
pub use handler::Analyzer;
pub use results::AnalysisResponse;

use audit::LighthouseRunner;
use cache::MemoryCache;
use config::ServerConfig;
use green::GreenWebClient;
use std::sync::Arc;

impl Analyzer {
    /// Wire the production collaborators described by `config`: an
    /// in-memory cache, the Green Web Foundation client and lighthouse.
    pub fn from_config(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let green = GreenWebClient::new(&config.green_check)?;
        Ok(Self::new(
            Arc::new(MemoryCache::new()),
            Arc::new(green),
            Arc::new(LighthouseRunner::new(config.audit.clone())),
            config.cache_ttl(),
        ))
    }
}
