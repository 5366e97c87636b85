use crate::config::AuditConfig;
use crate::error::AuditError;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Map, Value, json};
use std::future::Future;

/// An exclusive headless browser started for one audit.
///
/// The browser exposes a DevTools port that the audit tool attaches to.
/// Call [`BrowserSession::close`] when done; a session dropped without
/// being closed is closed in the background.
pub struct BrowserSession {
    client: Option<Client>,
    debug_port: u16,
}

impl BrowserSession {
    /// Start a new browser through the configured WebDriver server
    pub async fn launch(config: &AuditConfig) -> Result<Self, AuditError> {
        let debug_port = free_local_port().await?;
        let capabilities = chrome_capabilities(debug_port, &config.chrome_args);

        let client = connect(config, capabilities).await?;
        ::log::debug!("Browser session started with DevTools on port {}", debug_port);

        Ok(Self {
            client: Some(client),
            debug_port,
        })
    }

    pub fn debug_port(&self) -> u16 {
        self.debug_port
    }

    /// End the WebDriver session, which shuts the browser down.
    ///
    /// Failures are logged and never returned, so they cannot mask the
    /// outcome of the work done with the browser.
    pub async fn close(mut self) {
        if let Some(client) = self.client.take() {
            match client.close().await {
                Ok(()) => ::log::debug!("Browser on port {} closed", self.debug_port),
                Err(e) => ::log::warn!("Failed to close browser on port {}: {}", self.debug_port, e),
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let Some(client) = self.client.take() else {
            return;
        };
        let port = self.debug_port;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                ::log::debug!("Closing abandoned browser on port {}", port);
                handle.spawn(async move {
                    if let Err(e) = client.close().await {
                        ::log::warn!("Failed to close abandoned browser on port {}: {}", port, e);
                    }
                });
            }
            Err(_) => {
                ::log::warn!("No runtime available to close browser on port {}", port);
            }
        }
    }
}

/// Run `work` with a freshly launched browser and always release it after.
///
/// `work` receives the DevTools port of the browser. The session is closed on
/// both the success and the error path; if the returned future is dropped
/// early the session's `Drop` closes it instead.
pub async fn with_browser<F, Fut, T>(config: &AuditConfig, work: F) -> Result<T, AuditError>
where
    F: FnOnce(u16) -> Fut,
    Fut: Future<Output = Result<T, AuditError>>,
{
    let session = BrowserSession::launch(config).await?;
    let result = work(session.debug_port()).await;
    session.close().await;
    result
}

/// Capabilities requesting a headless Chrome listening on `debug_port`
pub fn chrome_capabilities(debug_port: u16, extra_args: &[String]) -> Map<String, Value> {
    let mut args = vec![
        "--headless=new".to_string(),
        format!("--remote-debugging-port={}", debug_port),
    ];
    args.extend(extra_args.iter().cloned());

    let mut capabilities = Map::new();
    capabilities.insert("browserName".to_string(), json!("chrome"));
    capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    capabilities
}

async fn connect(config: &AuditConfig, capabilities: Map<String, Value>) -> Result<Client, AuditError> {
    let webdriver_url = config.webdriver_url.as_str();
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities);

    let first_error = match builder.connect(webdriver_url).await {
        Ok(client) => return Ok(client),
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e.to_string()
        }
    };

    for url in &config.fallback_webdriver_urls {
        if url == webdriver_url {
            continue;
        }
        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = builder.connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(AuditError::Connect(first_error))
}

/// Ask the OS for a currently unused local TCP port
async fn free_local_port() -> Result<u16, AuditError> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Mock, Server, ServerGuard};
    use std::time::Duration;

    /// A WebDriver server that hands out session `abc` and expects it to be
    /// deleted exactly once
    async fn webdriver() -> (ServerGuard, Mock, Mock) {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/session")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value":{"sessionId":"abc","capabilities":{}}}"#)
            .expect(1)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/session/abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value":null}"#)
            .expect(1)
            .create_async()
            .await;
        (server, create, delete)
    }

    fn config_for(webdriver_url: String) -> AuditConfig {
        AuditConfig {
            webdriver_url,
            fallback_webdriver_urls: Vec::new(),
            ..AuditConfig::default()
        }
    }

    #[test]
    fn test_capabilities_request_headless_debug_port() {
        let caps = chrome_capabilities(9333, &["--no-sandbox".to_string()]);
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert_eq!(args[0], "--headless=new");
        assert_eq!(args[1], "--remote-debugging-port=9333");
        assert_eq!(args[2], "--no-sandbox");
        assert_eq!(caps["browserName"], "chrome");
    }

    #[tokio::test]
    async fn test_free_local_port_is_bindable() {
        let port = free_local_port().await.unwrap();
        assert_ne!(port, 0);
        assert!(tokio::net::TcpListener::bind(("127.0.0.1", port)).await.is_ok());
    }

    #[tokio::test]
    async fn test_browser_closed_after_successful_work() {
        let (server, create, delete) = webdriver().await;
        let config = config_for(server.url());

        let result = with_browser(&config, |port| async move { Ok(port) }).await;

        assert_ne!(result.unwrap(), 0);
        create.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_browser_closed_after_failed_work() {
        let (server, create, delete) = webdriver().await;
        let config = config_for(server.url());

        let result: Result<(), _> = with_browser(&config, |_| async {
            Err(AuditError::Navigation("net::ERR_CONNECTION_REFUSED".to_string()))
        })
        .await;

        match result {
            Err(AuditError::Navigation(message)) => assert_eq!(message, "net::ERR_CONNECTION_REFUSED"),
            other => panic!("expected the work's error, got {:?}", other),
        }
        create.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_browser_closed_when_work_is_abandoned() {
        let (server, create, delete) = webdriver().await;
        let config = config_for(server.url());

        let scope = with_browser(&config, |_| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        assert!(tokio::time::timeout(Duration::from_millis(500), scope).await.is_err());

        // The close runs on a spawned task once the session is dropped
        for _ in 0..100 {
            if delete.matched_async().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        create.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_fallback_webdriver_is_used() {
        let (server, create, delete) = webdriver().await;
        let config = AuditConfig {
            webdriver_url: "http://127.0.0.1:1".to_string(),
            fallback_webdriver_urls: vec![server.url()],
            ..AuditConfig::default()
        };

        assert!(with_browser(&config, |_| async { Ok(()) }).await.is_ok());
        create.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_launch_without_webdriver_fails_and_skips_work() {
        let config = config_for("http://127.0.0.1:1".to_string());
        let mut ran = false;
        let result = with_browser(&config, |_| {
            ran = true;
            async { Ok(()) }
        })
        .await;

        assert!(matches!(result, Err(AuditError::Connect(_))));
        assert!(!ran);
    }
}
