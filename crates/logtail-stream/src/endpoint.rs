//! Stream endpoint resolution.
//!
//! Accepts either a WebSocket URL (used as-is) or the HTTP(S) address of the
//! log source, in which case the socket lives at `/ws` on the same host with
//! the matching secure/insecure scheme.

use url::Url;

use logtail_core::prelude::*;

/// Path of the stream socket on an HTTP(S) log source
pub const STREAM_PATH: &str = "/ws";

/// Resolve user input into the WebSocket URL to connect to.
///
/// - `ws://` / `wss://` → unchanged
/// - `http://` / `https://` → `ws://` / `wss://` at [`STREAM_PATH`]
/// - `host:port` without a scheme → `ws://host:port/ws`
///
/// # Errors
///
/// [`Error::InvalidEndpoint`] for unparsable input, a missing host, or any
/// other scheme.
pub fn resolve_endpoint(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_endpoint(input, "empty URL"));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let mut url =
        Url::parse(&candidate).map_err(|e| Error::invalid_endpoint(input, e.to_string()))?;

    if url.host_str().is_none() {
        return Err(Error::invalid_endpoint(input, "missing host"));
    }

    let ws_scheme = match url.scheme() {
        "ws" | "wss" => return Ok(url),
        "http" => "ws",
        "https" => "wss",
        other => {
            return Err(Error::invalid_endpoint(
                input,
                format!("unsupported scheme '{other}'"),
            ))
        }
    };

    url.set_scheme(ws_scheme)
        .map_err(|_| Error::invalid_endpoint(input, "cannot switch to WebSocket scheme"))?;
    url.set_path(STREAM_PATH);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_url_unchanged() {
        let url = resolve_endpoint("ws://127.0.0.1:8000/ws").unwrap();
        assert_eq!(url.as_str(), "ws://127.0.0.1:8000/ws");
    }

    #[test]
    fn test_wss_url_with_custom_path_unchanged() {
        let url = resolve_endpoint("wss://logs.example.com/stream?x=1").unwrap();
        assert_eq!(url.as_str(), "wss://logs.example.com/stream?x=1");
    }

    #[test]
    fn test_http_maps_to_ws() {
        let url = resolve_endpoint("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8000/ws");
    }

    #[test]
    fn test_https_maps_to_wss_and_drops_page_path() {
        let url = resolve_endpoint("https://logs.example.com/index.html#top").unwrap();
        assert_eq!(url.as_str(), "wss://logs.example.com/ws");
    }

    #[test]
    fn test_bare_host_port() {
        let url = resolve_endpoint("localhost:8000").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8000/ws");
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = resolve_endpoint("ftp://example.com").unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve_endpoint("   ").is_err());
    }
}
