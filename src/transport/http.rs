use super::ProviderError;
use crate::Result;
use reqwest::Proxy;
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Longest slice of an error body kept in a [`ProviderError::Status`] message.
const MAX_ERROR_BODY: usize = 512;

/// Thin JSON-over-HTTP client shared by the concrete providers.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl HttpTransport {
    /// Build a transport for `base_url` with a static bearer credential.
    ///
    /// `timeout` bounds each request end to end. Pool sizing and an optional
    /// proxy can be tuned through `TRAILER_HTTP_*` / `TRAILER_PROXY_URL`.
    pub fn new(base_url: &str, bearer: Option<String>, timeout: Duration) -> Result<Self> {
        let parsed = url::Url::parse(base_url)?;
        let base_url = parsed.as_str().trim_end_matches('/').to_string();

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(
                env::var("TRAILER_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(8),
            )
            .pool_idle_timeout(Some(Duration::from_secs(
                env::var("TRAILER_HTTP_POOL_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(90),
            )));

        if let Ok(proxy_url) = env::var("TRAILER_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            bearer: bearer.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` (relative to the base URL) and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(query);

        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(http_status = status.as_u16(), url = url.as_str(), "provider request failed");
            return Err(ProviderError::status(status.as_u16(), truncate(&body)));
        }

        response.json::<T>().await.map_err(ProviderError::from)
    }
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(MAX_ERROR_BODY);
        let out = truncate(&long);
        assert!(out.ends_with("..."));
        assert!(out.len() <= MAX_ERROR_BODY + 3);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpTransport::new("not a url", None, Duration::from_secs(1));
        assert!(matches!(err, Err(crate::Error::Url(_))));
    }

    #[test]
    fn normalizes_trailing_slash() {
        let t = HttpTransport::new("https://api.example.com/3/", None, Duration::from_secs(1))
            .unwrap();
        assert_eq!(t.base_url(), "https://api.example.com/3");
    }
}
