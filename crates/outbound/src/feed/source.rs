use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use super::decode::decode_csv;
use super::table::RawTable;
use crate::error::FeedError;
use crate::sanitize;

/// Something that can produce a whole feed table for a location.
///
/// A fetch either returns the complete table or fails; implementations never
/// hand back a partially read table.
pub trait FeedSource: Send + Sync {
    fn fetch(&self, location: &str) -> Result<RawTable, FeedError>;
}

/// Fetches published CSV over HTTP(S) with a blocking client.
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::Client)?;
        Ok(Self { client })
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self, location: &str) -> Result<RawTable, FeedError> {
        let redacted = sanitize::redact_url(location);
        log::debug!("Fetching feed from {}", redacted);

        let request_error = |source| FeedError::Request {
            url: redacted.clone(),
            source,
        };

        let response = self.client.get(location).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                url: redacted.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(request_error)?;
        decode_csv(body.as_ref())
    }
}

/// Reads a CSV feed from the local filesystem. Accepts bare paths and
/// `file://` locations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFeedSource;

impl FeedSource for FileFeedSource {
    fn fetch(&self, location: &str) -> Result<RawTable, FeedError> {
        let path = Path::new(location.strip_prefix("file://").unwrap_or(location));
        log::debug!("Reading feed file {}", sanitize::redact_path(path));

        let file = File::open(path).map_err(|e| FeedError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        decode_csv(file)
    }
}

/// Routes `http://` and `https://` locations to HTTP and everything else to
/// the filesystem.
pub struct LocationFeedSource {
    http: HttpFeedSource,
    file: FileFeedSource,
}

impl LocationFeedSource {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        Ok(Self {
            http: HttpFeedSource::new(timeout)?,
            file: FileFeedSource,
        })
    }
}

impl FeedSource for LocationFeedSource {
    fn fetch(&self, location: &str) -> Result<RawTable, FeedError> {
        if is_http(location) {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

fn is_http(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_http() {
        assert!(is_http("https://docs.google.com/x"));
        assert!(is_http("HTTP://example.com"));
        assert!(!is_http("file:///tmp/feed.csv"));
        assert!(!is_http("/tmp/feed.csv"));
    }

    #[test]
    fn test_file_source_reads_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "JOB Num,Order No").unwrap();
        writeln!(file, "J1,O1").unwrap();
        file.flush().unwrap();

        let location = format!("file://{}", file.path().display());
        let table = FileFeedSource.fetch(&location).unwrap();
        assert_eq!(table.len(), 1);

        let table = FileFeedSource
            .fetch(&file.path().display().to_string())
            .unwrap();
        assert_eq!(table.headers(), &["JOB Num", "Order No"]);
    }

    #[test]
    fn test_file_source_missing_file() {
        let result = FileFeedSource.fetch("/nonexistent/outbound.csv");
        assert!(matches!(result, Err(FeedError::ReadFile { .. })));
    }
}
