//! Inventory sources.
//!
//! A source yields the raw text of the plant inventory. Failures are
//! reported as [`PlantError::SourceFetch`] and are never retried here; the
//! refresh throttle decides when the next attempt happens.

use crate::constants::FETCH_TIMEOUT_SECS;
use crate::error::{PlantError, Result};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Anything that can produce the raw inventory text
pub trait InventorySource {
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Inventory location: a local file or an HTTP(S) URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Http(String),
}

impl DataSource {
    /// Interpret a location string, treating `http://` and `https://` as URLs
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Http(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    /// Fetch the inventory, failing with [`PlantError::SourceFetch`] when
    /// it takes longer than `timeout`
    pub async fn fetch_with_timeout(&self, timeout: Duration) -> Result<String> {
        debug!("Fetching inventory from {}", self);

        let fetch = async {
            match self {
                DataSource::File(path) => self.fetch_file(path).await,
                DataSource::Http(url) => self.fetch_http(url).await,
            }
        };

        let text = tokio::time::timeout(timeout, fetch)
            .await
            .map_err(|_| {
                PlantError::source_fetch(self.to_string(), format!("timed out after {:?}", timeout))
            })??;

        debug!("Fetched {} bytes from {}", text.len(), self);
        Ok(text)
    }

    async fn fetch_file(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PlantError::source_fetch(self.to_string(), e.to_string()))
    }

    async fn fetch_http(&self, url: &str) -> Result<String> {
        let response = reqwest::get(url)
            .await
            .map_err(|e| PlantError::source_fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlantError::source_fetch(url, format!("HTTP status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| PlantError::source_fetch(url, e.to_string()))
    }
}

impl InventorySource for DataSource {
    async fn fetch(&self) -> Result<String> {
        self.fetch_with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .await
    }
}

impl FromStr for DataSource {
    type Err = PlantError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(PlantError::configuration("Inventory source cannot be empty"));
        }
        Ok(DataSource::parse(s))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Http(url) => write!(f, "{}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            DataSource::parse("https://example.org/ABG.csv"),
            DataSource::Http("https://example.org/ABG.csv".to_string())
        );
        assert_eq!(
            DataSource::parse(" ./ABG.csv "),
            DataSource::File(PathBuf::from("./ABG.csv"))
        );
    }

    #[test]
    fn test_from_str_rejects_empty() {
        assert!("".parse::<DataSource>().is_err());
        assert!("inventory.csv".parse::<DataSource>().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ABG.csv");
        fs::write(&path, "header\nA,Name\n").unwrap();

        let text = DataSource::File(path).fetch().await.unwrap();
        assert_eq!(text, "header\nA,Name\n");
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_source_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = DataSource::File(temp_dir.path().join("missing.csv"));

        match source.fetch().await {
            Err(PlantError::SourceFetch { source_name, .. }) => {
                assert!(source_name.ends_with("missing.csv"));
            }
            other => panic!("expected SourceFetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unresponsive_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        // Accept the connection and never answer
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let source = DataSource::parse(&format!("http://{}/ABG.csv", address));
        let result = source.fetch_with_timeout(Duration::from_millis(200)).await;

        match result {
            Err(PlantError::SourceFetch { reason, .. }) => {
                assert!(reason.contains("timed out"), "unexpected reason: {}", reason);
            }
            other => panic!("expected SourceFetch error, got {:?}", other),
        }

        server.abort();
    }
}
