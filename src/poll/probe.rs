// ABOUTME: UrlProbe trait and its hyper-based HTTP/1 implementation.
// ABOUTME: Each probe is a single uncached GET bounded by its own timeout.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Empty;
use hyper::header::{CACHE_CONTROL, EXPIRES, HOST, PRAGMA};
use hyper::{Method, Request, Uri};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use super::ProbeError;

/// One availability check against a URL.
#[async_trait]
pub trait UrlProbe: Send + Sync {
    /// `Ok` on a 2xx answer within `timeout`.
    async fn probe(&self, url: &str, timeout: Duration) -> Result<(), ProbeError>;
}

/// Plain HTTP/1.1 GET over a fresh TCP connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpProbe;

struct Target {
    host: String,
    port: u16,
    path: String,
}

impl Target {
    fn parse(url: &str) -> Result<Self, ProbeError> {
        let uri: Uri = url
            .parse()
            .map_err(|_| ProbeError::InvalidUrl(url.to_string()))?;
        match uri.scheme_str() {
            Some("http") => {}
            other => return Err(ProbeError::UnsupportedScheme(other.unwrap_or("").to_string())),
        }
        let host = uri
            .host()
            .ok_or_else(|| ProbeError::InvalidUrl(url.to_string()))?
            .to_string();
        let path = uri
            .path_and_query()
            .map(|p| p.as_str().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "/".to_string());

        Ok(Self {
            host,
            port: uri.port_u16().unwrap_or(80),
            path,
        })
    }

    fn authority(&self) -> String {
        if self.port == 80 {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl HttpProbe {
    async fn get(&self, target: &Target) -> Result<(), ProbeError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(target.path.as_str())
            .header(HOST, target.authority())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .header(EXPIRES, "0")
            .body(Empty::<Bytes>::new())
            .map_err(|e| ProbeError::Request(e.to_string()))?;

        let stream = TcpStream::connect((target.host.as_str(), target.port))
            .await
            .map_err(ProbeError::Connect)?;
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream)).await?;

        // Decided on the status line alone; the body is never read. The connection
        // is owned by this future and closes with it.
        let status = tokio::select! {
            biased;
            resp = sender.send_request(req) => resp?.status(),
            closed = conn => {
                if let Err(e) = closed {
                    return Err(e.into());
                }
                return Err(ProbeError::Connect(std::io::Error::from(
                    std::io::ErrorKind::UnexpectedEof,
                )));
            }
        };

        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn probe(&self, url: &str, timeout: Duration) -> Result<(), ProbeError> {
        let target = Target::parse(url)?;
        match tokio::time::timeout(timeout, self.get(&target)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::TimedOut(timeout)),
        }
    }
}
