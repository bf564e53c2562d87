//! HTTP fetching for results pages.
//!
//! Each request carries a User-Agent picked at random from the configured pool.
//! This only dodges the crudest bot filters; nothing relies on it.

use std::future::Future;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use reqwest::header::{ACCEPT, USER_AGENT};
use thiserror::Error;

use crate::config::ScrapeConfig;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9";

/// Fallback when the configured pool is empty.
const DEFAULT_USER_AGENT: &str = concat!("xoso-check/", env!("CARGO_PKG_VERSION"));

/// Errors for a single source fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

/// Anything that can turn a URL into page markup.
///
/// The orchestrator is generic over this so tests can substitute canned pages
/// or artificially slow sources.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agents: Vec<String>,
    request_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        Self::with_builder(reqwest::Client::builder(), config)
    }

    fn with_builder(builder: reqwest::ClientBuilder, config: &ScrapeConfig) -> Result<Self, FetchError> {
        let client = builder
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            user_agents: config.user_agents.clone(),
            request_timeout: config.request_timeout,
        })
    }

    fn pick_user_agent(&self) -> &str {
        pick_user_agent(&self.user_agents)
    }
}

/// Uniform random pick from the pool.
pub fn pick_user_agent(pool: &[String]) -> &str {
    pool.choose(&mut rand::thread_rng())
        .map(String::as_str)
        .unwrap_or(DEFAULT_USER_AGENT)
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let user_agent = self.pick_user_agent().to_string();

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        tracing::debug!(url, bytes = body.len(), elapsed = ?start.elapsed(), "fetched page");
        Ok(body)
    }
}

impl HttpFetcher {
    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.request_timeout)
        } else {
            FetchError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    #[test]
    fn pick_user_agent_stays_in_pool() {
        let pool: Vec<String> = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        for _ in 0..50 {
            let ua = pick_user_agent(&pool);
            assert!(pool.iter().any(|p| p == ua));
        }
    }

    #[test]
    fn pick_user_agent_empty_pool_falls_back() {
        assert!(pick_user_agent(&[]).starts_with("xoso-check/"));
    }

    #[test]
    fn client_builds_from_default_config() {
        let fetcher = HttpFetcher::new(&ScrapeConfig::default()).unwrap();
        assert_eq!(fetcher.user_agents.len(), 4);
    }

    /// Accept one connection, wait `delay`, answer with `response`.
    /// The task yields the raw request head.
    async fn serve_once(response: String, delay: Duration) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            tokio::time::sleep(delay).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/xsmn-09-02-2026.html"), handle)
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn local_fetcher(request_timeout: Duration) -> HttpFetcher {
        let config = ScrapeConfig {
            request_timeout,
            user_agents: vec!["ua-one".to_string(), "ua-two".to_string()],
            ..ScrapeConfig::default()
        };
        HttpFetcher::with_builder(reqwest::Client::builder().no_proxy(), &config).unwrap()
    }

    fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
        head.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    #[tokio::test]
    async fn fetch_returns_body_and_sends_headers() {
        let (url, server) = serve_once(http_response("200 OK", "<table class=\"kqxs\"></table>"), Duration::ZERO).await;
        let fetcher = local_fetcher(Duration::from_secs(5));

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "<table class=\"kqxs\"></table>");

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /xsmn-09-02-2026.html"));
        let ua = header(&head, "user-agent").unwrap();
        assert!(ua == "ua-one" || ua == "ua-two", "user agent {ua}");
        assert_eq!(header(&head, "accept"), Some(ACCEPT_HTML));
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let (url, server) = serve_once(http_response("503 Service Unavailable", ""), Duration::ZERO).await;
        let fetcher = local_fetcher(Duration::from_secs(5));

        let err = fetcher.fetch(&url).await.unwrap_err();
        match err {
            FetchError::Status { status, url: failed } => {
                assert_eq!(status, 503);
                assert_eq!(failed, url);
            }
            other => panic!("unexpected {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn slow_server_hits_request_timeout() {
        let timeout = Duration::from_millis(200);
        let (url, server) = serve_once(http_response("200 OK", "late"), Duration::from_secs(5)).await;
        let fetcher = local_fetcher(timeout);

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(d) if d == timeout), "got {err:?}");
        server.abort();
    }
}
