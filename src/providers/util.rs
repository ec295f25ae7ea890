use crate::core::error::FetchError;
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("kurse/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by all requests of one provider.
pub fn http_client(source_name: &'static str, timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::transport(source_name, e))
}

/// Sends the request and returns the raw body of a successful response.
pub async fn fetch_body(
    source_name: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<(HeaderMap, Vec<u8>), FetchError> {
    let response = request
        .send()
        .await
        .map_err(|e| FetchError::transport(source_name, e))?;
    debug!(status = %response.status(), "Received {} response", source_name);

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            source_name,
            status,
        });
    }

    let headers = response.headers().clone();
    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::transport(source_name, e))?;
    Ok((headers, body.to_vec()))
}

/// Logs the provider's rate-limit headers when present.
pub fn log_rate_limit(source_name: &str, headers: &HeaderMap) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let limit = header("x-ratelimit-limit");
    let remaining = header("x-ratelimit-remaining");
    if limit.is_some() || remaining.is_some() {
        info!(
            remaining = remaining.as_deref().unwrap_or("?"),
            limit = limit.as_deref().unwrap_or("?"),
            "{} rate limit remaining/limit",
            source_name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_rate_limit_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("500"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("498"));

        let output = capture_logs(|| log_rate_limit("quotes", &headers));
        assert!(output.contains("quotes rate limit remaining/limit"), "{output}");
        assert!(output.contains("498"), "{output}");
        assert!(output.contains("500"), "{output}");
    }

    #[test]
    fn test_log_rate_limit_partial_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("7"));

        let output = capture_logs(|| log_rate_limit("quotes", &headers));
        assert!(output.contains("remaining"), "{output}");
        assert!(output.contains('7'), "{output}");
        assert!(output.contains('?'), "{output}");
    }

    #[test]
    fn test_log_rate_limit_without_headers() {
        let output = capture_logs(|| log_rate_limit("rates", &HeaderMap::new()));
        assert!(output.is_empty(), "{output}");
    }
}
