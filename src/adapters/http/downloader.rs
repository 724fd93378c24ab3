//! File downloads over HTTP
//!
//! Files are fetched from `{base_url}/files/download/{id}` unless the library
//! carries an explicit `download_url`. Bodies are streamed chunk by chunk.
//!
//! `timeout_seconds` bounds the wait for the response headers and the gap
//! between two body chunks, never the whole transfer, so large videos can
//! take as long as they need while a stalled connection still fails.

use crate::adapters::traits::{ByteStream, Downloader};
use crate::config::{DownloadConfig, SecretString};
use crate::domain::{DownloadError, File, Result, ShutterError};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Header carrying the auth token
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// HTTP implementation of [`Downloader`]
///
/// # Example
///
/// ```no_run
/// use shutter::adapters::http::HttpDownloader;
/// use shutter::config::{DownloadConfig, RetryConfig};
///
/// let config = DownloadConfig {
///     base_url: "https://files.example.com".to_string(),
///     auth_token: None,
///     timeout_seconds: 60,
///     retry: RetryConfig::default(),
/// };
/// let downloader = HttpDownloader::new(&config).expect("valid config");
/// ```
pub struct HttpDownloader {
    base_url: Url,
    client: Client,
    auth_token: Option<SecretString>,
    timeout: Duration,
}

impl HttpDownloader {
    /// Create a new downloader
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            ShutterError::Configuration(format!("Invalid base_url '{}': {e}", config.base_url))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ShutterError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            auth_token: config.auth_token.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// URL the content of `file` is fetched from
    pub fn file_url(&self, file: &File) -> Result<Url> {
        let joined = match &file.download_url {
            Some(url) => self.base_url.join(url),
            None => self.base_url.join(&format!("files/download/{}", file.id)),
        };

        joined.map_err(|e| {
            ShutterError::from(DownloadError::MissingContent(format!("file {}: {e}", file.id)))
        })
    }
}

fn map_status(status: StatusCode, file: &File, body: String) -> DownloadError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DownloadError::AuthenticationFailed(format!("status {status}"))
        }
        StatusCode::NOT_FOUND => DownloadError::FileNotFound(file.id.to_string()),
        StatusCode::TOO_MANY_REQUESTS => DownloadError::RateLimitExceeded(body),
        status if status.is_server_error() => DownloadError::ServerError {
            status: status.as_u16(),
            message: body,
        },
        status => DownloadError::ClientError {
            status: status.as_u16(),
            message: body,
        },
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download_file(&self, file: &File) -> Result<ByteStream> {
        let url = self.file_url(file)?;

        tracing::debug!(file_id = %file.id, url = %url, "Downloading file");

        let mut request = self.client.get(url);
        if let Some(token) = &self.auth_token {
            let token: &str = token.expose_secret().as_ref();
            request = request.header(AUTH_TOKEN_HEADER, token);
        }

        let resp = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| {
                DownloadError::Timeout(format!(
                    "no response for file {} within {}s",
                    file.id,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                if e.is_timeout() {
                    DownloadError::Timeout(e.to_string())
                } else {
                    DownloadError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = match status {
                StatusCode::TOO_MANY_REQUESTS => resp
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("unknown")
                    .to_string(),
                _ => resp.text().await.unwrap_or_default(),
            };
            return Err(map_status(status, file, body).into());
        }

        Ok(with_idle_timeout(resp.bytes_stream(), self.timeout).boxed())
    }
}

/// Ends `body` with a [`DownloadError::Timeout`] when no chunk arrives
/// within `idle`
fn with_idle_timeout<S, B>(body: S, idle: Duration) -> impl Stream<Item = Result<Vec<u8>>> + Send
where
    S: Stream<Item = reqwest::Result<B>> + Send + 'static,
    B: AsRef<[u8]> + Send,
{
    futures::stream::unfold(Some(Box::pin(body)), move |state| async move {
        let mut body = state?;
        match tokio::time::timeout(idle, body.next()).await {
            Ok(Some(Ok(chunk))) => Some((Ok(chunk.as_ref().to_vec()), Some(body))),
            Ok(Some(Err(e))) => Some((
                Err(ShutterError::from(DownloadError::StreamInterrupted(
                    e.to_string(),
                ))),
                None,
            )),
            Ok(None) => None,
            Err(_) => Some((
                Err(ShutterError::from(DownloadError::Timeout(format!(
                    "no data received for {}s",
                    idle.as_secs()
                )))),
                None,
            )),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, RetryConfig};
    use crate::domain::{CollectionId, FileId, FileMetadata};
    use futures::TryStreamExt;
    use std::io::Write;

    fn config(base_url: String, token: Option<&str>) -> DownloadConfig {
        DownloadConfig {
            base_url,
            auth_token: token.map(|t| secret_string(t.to_string())),
            timeout_seconds: 5,
            retry: RetryConfig::default(),
        }
    }

    fn file(id: i64) -> File {
        File::new(
            FileId::new(id),
            CollectionId::new(42),
            FileMetadata::new("sunset beach"),
        )
    }

    async fn collect(stream: ByteStream) -> Vec<u8> {
        stream
            .try_collect::<Vec<Vec<u8>>>()
            .await
            .unwrap()
            .concat()
    }

    #[test]
    fn test_file_url() {
        let downloader =
            HttpDownloader::new(&config("https://files.example.com/api".to_string(), None))
                .unwrap();

        assert_eq!(
            downloader.file_url(&file(7)).unwrap().as_str(),
            "https://files.example.com/api/files/download/7"
        );

        let mut explicit = file(8);
        explicit.download_url = Some("https://cdn.example.com/8".to_string());
        assert_eq!(
            downloader.file_url(&explicit).unwrap().as_str(),
            "https://cdn.example.com/8"
        );
    }

    #[tokio::test]
    async fn test_download_streams_body_with_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/files/download/7")
            .match_header("x-auth-token", "secret-token")
            .with_status(200)
            .with_body("jpeg bytes")
            .create_async()
            .await;

        let downloader = HttpDownloader::new(&config(server.url(), Some("secret-token"))).unwrap();
        let stream = downloader.download_file(&file(7)).await.unwrap();

        assert_eq!(collect(stream).await, b"jpeg bytes");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_is_permanent() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/files/download/7")
            .with_status(404)
            .create_async()
            .await;

        let downloader = HttpDownloader::new(&config(server.url(), None)).unwrap();
        let err = downloader.download_file(&file(7)).await.err().unwrap();

        assert!(matches!(
            err,
            ShutterError::Download(DownloadError::FileNotFound(_))
        ));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_server_error_is_transient() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/files/download/7")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let downloader = HttpDownloader::new(&config(server.url(), None)).unwrap();
        let err = downloader.download_file(&file(7)).await.err().unwrap();

        assert!(matches!(
            err,
            ShutterError::Download(DownloadError::ServerError { status: 503, .. })
        ));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_unauthorized_and_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _unauthorized = server
            .mock("GET", "/files/download/1")
            .with_status(401)
            .create_async()
            .await;
        let _limited = server
            .mock("GET", "/files/download/2")
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let downloader = HttpDownloader::new(&config(server.url(), None)).unwrap();

        let err = downloader.download_file(&file(1)).await.err().unwrap();
        assert!(matches!(
            err,
            ShutterError::Download(DownloadError::AuthenticationFailed(_))
        ));

        let err = downloader.download_file(&file(2)).await.err().unwrap();
        match err {
            ShutterError::Download(DownloadError::RateLimitExceeded(after)) => {
                assert_eq!(after, "30")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_slow_body_outlasting_timeout_completes() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/files/download/7")
            .with_status(200)
            .with_chunked_body(|w| {
                for part in ["one ", "two ", "three ", "four ", "five"] {
                    w.write_all(part.as_bytes())?;
                    w.flush()?;
                    std::thread::sleep(Duration::from_millis(400));
                }
                Ok(())
            })
            .create_async()
            .await;

        let mut config = config(server.url(), None);
        config.timeout_seconds = 1;
        let downloader = HttpDownloader::new(&config).unwrap();
        let stream = downloader.download_file(&file(7)).await.unwrap();

        assert_eq!(collect(stream).await, b"one two three four five");
    }

    #[tokio::test]
    async fn test_stalled_body_times_out() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/files/download/7")
            .with_status(200)
            .with_chunked_body(|w| {
                w.write_all(b"first")?;
                w.flush()?;
                std::thread::sleep(Duration::from_millis(2500));
                w.write_all(b"late")
            })
            .create_async()
            .await;

        let mut config = config(server.url(), None);
        config.timeout_seconds = 1;
        let downloader = HttpDownloader::new(&config).unwrap();

        let err = match downloader.download_file(&file(7)).await {
            Ok(stream) => stream
                .try_collect::<Vec<Vec<u8>>>()
                .await
                .err()
                .unwrap(),
            Err(e) => e,
        };

        assert!(matches!(
            err,
            ShutterError::Download(DownloadError::Timeout(_))
        ));
        assert!(err.is_transient());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpDownloader::new(&config("not a url".to_string(), None));
        assert!(matches!(result, Err(ShutterError::Configuration(_))));
    }
}
