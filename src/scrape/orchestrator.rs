//! Primary-then-fallback acquisition under one deadline.
//!
//! Sources are tried strictly in order; the fallback is only fetched when the
//! primary failed or had no table for the station. Individual source failures
//! are logged and swallowed. The caller sees one of three outcomes: records,
//! `ScrapeError::Failed` or `ScrapeError::Timeout`.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::ScrapeConfig;
use crate::domain::{PrizeRecord, format_source_url};
use crate::scrape::extract::{Extractor, MinhNgoc, XosoMe};
use crate::scrape::fetcher::{FetchError, HttpFetcher, PageFetcher};

/// Terminal outcomes of an acquisition
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("No results found for station {station} on {draw_date} (all sources tried).")]
    Failed { station: String, draw_date: NaiveDate },
    #[error("Timed out fetching results after {0:?}.")]
    Timeout(Duration),
}

/// A results site, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Fallback,
}

impl Source {
    pub const ORDER: [Source; 2] = [Source::Primary, Source::Fallback];

    pub fn name(self) -> &'static str {
        match self {
            Source::Primary => "xoso.me",
            Source::Fallback => "minhngoc.net.vn",
        }
    }

    pub fn url_template(self, config: &ScrapeConfig) -> &str {
        match self {
            Source::Primary => &config.primary_url,
            Source::Fallback => &config.fallback_url,
        }
    }

    /// The markup strategy for this site.
    pub fn extractor(self) -> &'static dyn Extractor {
        match self {
            Source::Primary => &XosoMe,
            Source::Fallback => &MinhNgoc,
        }
    }
}

/// Why one source produced nothing. Logged, never returned.
#[derive(Debug, Error)]
enum SourceMiss {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("no table for station")]
    NoTable,
}

pub struct Scraper<F = HttpFetcher> {
    fetcher: F,
    config: ScrapeConfig,
}

impl Scraper<HttpFetcher> {
    pub fn new(config: ScrapeConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: PageFetcher> Scraper<F> {
    pub fn with_fetcher(fetcher: F, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch and extract results for `station` on `draw_date`.
    ///
    /// The whole primary + fallback sequence runs under `config.deadline`. On
    /// expiry the sequence future is dropped, which drops the in-flight reqwest
    /// future and closes its connection.
    pub async fn acquire_results(
        &self,
        station: &str,
        draw_date: NaiveDate,
    ) -> Result<Vec<PrizeRecord>, ScrapeError> {
        let deadline = self.config.deadline;
        let start = Instant::now();

        match tokio::time::timeout(deadline, self.try_sources(station, draw_date)).await {
            Ok(Some(records)) => {
                tracing::info!(
                    station,
                    %draw_date,
                    records = records.len(),
                    elapsed = ?start.elapsed(),
                    "acquired results"
                );
                Ok(records)
            }
            Ok(None) => Err(ScrapeError::Failed {
                station: station.to_string(),
                draw_date,
            }),
            Err(_) => {
                tracing::warn!(station, %draw_date, ?deadline, "scrape deadline exceeded");
                Err(ScrapeError::Timeout(deadline))
            }
        }
    }

    async fn try_sources(&self, station: &str, draw_date: NaiveDate) -> Option<Vec<PrizeRecord>> {
        for source in Source::ORDER {
            match self.try_source(source, station, draw_date).await {
                Ok(records) => return Some(records),
                Err(miss) => {
                    tracing::warn!(source = source.name(), station, %draw_date, reason = %miss, "source yielded nothing");
                }
            }
        }
        None
    }

    async fn try_source(
        &self,
        source: Source,
        station: &str,
        draw_date: NaiveDate,
    ) -> Result<Vec<PrizeRecord>, SourceMiss> {
        let url = format_source_url(source.url_template(&self.config), draw_date);
        tracing::debug!(source = source.name(), url = %url, "fetching");

        let markup = self.fetcher.fetch(&url).await?;
        let records = source.extractor().extract(&markup, station, draw_date);
        tracing::debug!(source = source.name(), records = records.len(), "extracted");

        if records.is_empty() {
            Err(SourceMiss::NoTable)
        } else {
            Ok(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PRIMARY_PAGE: &str = r#"<h3>TP. HCM</h3><table class="kqxs">
        <tr><td>G8</td><td>56</td></tr><tr><td>ĐB</td><td>123456</td></tr></table>"#;
    const FALLBACK_PAGE: &str = r#"<table class="rightcl"><tr><td class="tinh">TP. HCM</td></tr>
        <tr><td>Giải tám</td><td>78</td></tr></table>"#;

    /// Serves canned responses keyed by which template the URL came from.
    struct FakeFetcher {
        primary: Result<&'static str, u16>,
        fallback: Result<&'static str, u16>,
        delay: Duration,
        calls: Mutex<Vec<String>>,
        completed: AtomicUsize,
    }

    impl FakeFetcher {
        fn new(primary: Result<&'static str, u16>, fallback: Result<&'static str, u16>) -> Self {
            Self {
                primary,
                fallback,
                delay: Duration::ZERO,
                calls: Mutex::new(Vec::new()),
                completed: AtomicUsize::new(0),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.completed.fetch_add(1, Ordering::SeqCst);
            let canned = if url.starts_with("primary") { self.primary } else { self.fallback };
            canned.map(str::to_string).map_err(|status| FetchError::Status {
                status,
                url: url.to_string(),
            })
        }
    }

    fn config(deadline: Duration) -> ScrapeConfig {
        ScrapeConfig {
            primary_url: "primary/{dd}-{mm}-{yyyy}".to_string(),
            fallback_url: "fallback/{dd}-{mm}-{yyyy}".to_string(),
            deadline,
            ..ScrapeConfig::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 9).unwrap()
    }

    #[tokio::test]
    async fn primary_hit_skips_fallback() {
        let scraper = Scraper::with_fetcher(
            FakeFetcher::new(Ok(PRIMARY_PAGE), Ok(FALLBACK_PAGE)),
            config(Duration::from_secs(5)),
        );
        let records = scraper.acquire_results("TP", date()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(scraper.fetcher.calls(), vec!["primary/09-02-2026".to_string()]);
    }

    #[tokio::test]
    async fn primary_error_falls_back() {
        let scraper = Scraper::with_fetcher(
            FakeFetcher::new(Err(503), Ok(FALLBACK_PAGE)),
            config(Duration::from_secs(5)),
        );
        let records = scraper.acquire_results("TP", date()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "78");
        assert_eq!(scraper.fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn primary_without_station_falls_back() {
        let scraper = Scraper::with_fetcher(
            FakeFetcher::new(Ok("<html><body>no tables</body></html>"), Ok(FALLBACK_PAGE)),
            config(Duration::from_secs(5)),
        );
        let records = scraper.acquire_results("TP", date()).await.unwrap();
        assert_eq!(records[0].value, "78");
    }

    #[tokio::test]
    async fn both_sources_empty_is_failed() {
        let scraper = Scraper::with_fetcher(
            FakeFetcher::new(Err(404), Ok("<p>nothing</p>")),
            config(Duration::from_secs(5)),
        );
        let err = scraper.acquire_results("TP", date()).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Failed { .. }));
    }

    #[tokio::test]
    async fn slow_sources_hit_deadline() {
        let deadline = Duration::from_millis(100);
        let scraper = Scraper::with_fetcher(
            FakeFetcher::new(Ok(PRIMARY_PAGE), Ok(FALLBACK_PAGE)).slow(Duration::from_secs(10)),
            config(deadline),
        );

        let start = Instant::now();
        let err = scraper.acquire_results("TP", date()).await.unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(err, ScrapeError::Timeout(d) if d == deadline));
        assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
        // The in-flight fetch was dropped, not left to finish.
        assert_eq!(scraper.fetcher.completed.load(Ordering::SeqCst), 0);
        assert_eq!(scraper.fetcher.calls().len(), 1);
    }

    #[test]
    fn sources_map_to_their_templates() {
        let config = config(Duration::from_secs(1));
        assert!(Source::Primary.url_template(&config).starts_with("primary"));
        assert!(Source::Fallback.url_template(&config).starts_with("fallback"));
        assert_eq!(Source::ORDER[0], Source::Primary);
    }
}
