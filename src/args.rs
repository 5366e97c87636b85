use clap::Parser;
use green_audit::config::ServerConfig;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "green-audit")]
#[command(about = "HTTP service auditing page quality, carbon emissions and green hosting")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory of static assets to serve
    #[arg(long)]
    pub public_dir: Option<String>,

    /// WebDriver server used to launch browsers
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Path to the lighthouse executable
    #[arg(long)]
    pub lighthouse: Option<String>,

    /// Audit timeout in seconds
    #[arg(long)]
    pub audit_timeout: Option<u64>,

    /// Cache time-to-live in seconds
    #[arg(long)]
    pub cache_ttl: Option<u64>,
}

impl Args {
    /// Configuration file (or defaults) with command line overrides applied
    pub fn load_config(&self) -> Result<ServerConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = &self.public_dir {
            config.public_dir = dir.clone();
        }
        if let Some(url) = self.webdriver_url.as_deref().filter(|u| !u.is_empty()) {
            config.audit.webdriver_url = url.to_string();
        }
        if let Some(path) = &self.lighthouse {
            config.audit.lighthouse_path = path.clone();
        }
        if let Some(secs) = self.audit_timeout {
            config.audit.timeout_secs = secs;
        }
        if let Some(secs) = self.cache_ttl {
            config.cache_ttl_secs = secs;
        }
        Ok(config)
    }
}
