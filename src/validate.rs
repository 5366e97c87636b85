use url::Url;

/// Parse a requested target into an absolute URL.
///
/// Returns `None` unless the string parses and carries both a scheme and a
/// non-empty host. No network access is performed.
pub fn parse_target(raw: &str) -> Option<Url> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            ::log::debug!("Rejecting unparsable URL {:?}: {}", raw, e);
            return None;
        }
    };

    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => {
            ::log::debug!("Rejecting URL without a host: {}", raw);
            None
        }
    }
}

/// Canonical form of a target URL used as the cache key.
///
/// Relies on the `url` crate serialization: scheme and host are lowercased,
/// default ports are dropped and an empty path becomes `/`. Query parameter
/// order is left as requested.
pub fn cache_key(url: &Url) -> String {
    url.as_str().to_string()
}
