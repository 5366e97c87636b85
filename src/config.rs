use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration for the analysis server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static assets served next to the API
    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    /// How long a finished analysis is reused, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub green_check: GreenCheckConfig,
}

/// Configuration for the browser session and the audit tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// URL of the WebDriver server that launches browsers
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Endpoints tried in order when `webdriver_url` is unreachable
    #[serde(default = "default_fallback_webdriver_urls")]
    pub fallback_webdriver_urls: Vec<String>,

    /// Path or name of the lighthouse executable
    #[serde(default = "default_lighthouse_path")]
    pub lighthouse_path: String,

    /// Upper bound for one audit, in seconds
    #[serde(default = "default_audit_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra command line switches for the browser
    #[serde(default)]
    pub chrome_args: Vec<String>,

    /// Extra flags passed to lighthouse ahead of the target URL
    #[serde(default)]
    pub lighthouse_args: Vec<String>,
}

/// Configuration for the green hosting registry client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenCheckConfig {
    /// Registry API root; lookups go to `{base_url}/greencheck/{domain}`
    #[serde(default = "default_green_check_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_green_check_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl AuditConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl GreenCheckConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            public_dir: default_public_dir(),
            cache_ttl_secs: default_cache_ttl_secs(),
            audit: AuditConfig::default(),
            green_check: GreenCheckConfig::default(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            fallback_webdriver_urls: default_fallback_webdriver_urls(),
            lighthouse_path: default_lighthouse_path(),
            timeout_secs: default_audit_timeout_secs(),
            chrome_args: Vec::new(),
            lighthouse_args: Vec::new(),
        }
    }
}

impl Default for GreenCheckConfig {
    fn default() -> Self {
        Self {
            base_url: default_green_check_url(),
            timeout_secs: default_green_check_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    4000
}

fn default_public_dir() -> String {
    "public".to_string()
}

/// One hour
fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_fallback_webdriver_urls() -> Vec<String> {
    vec![
        "http://localhost:9515".to_string(), // ChromeDriver default
        "http://127.0.0.1:4444".to_string(),
    ]
}

fn default_lighthouse_path() -> String {
    "lighthouse".to_string()
}

fn default_audit_timeout_secs() -> u64 {
    120
}

fn default_green_check_url() -> String {
    "https://api.thegreenwebfoundation.org/api/v3".to_string()
}

fn default_green_check_timeout_secs() -> u64 {
    10
}
