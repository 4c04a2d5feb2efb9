use std::time::Duration;

use ago_config::dictionary::DictionaryConfig;
use ago_core::dictionary::{Dictionary, LookupError};
use async_trait::async_trait;

use crate::sections::definition_block;

/// English dictionary backed by the Daum search page.
#[derive(Clone)]
pub struct DaumDictionary {
    client: reqwest::Client,
    endpoint: String,
}

impl DaumDictionary {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &DictionaryConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

#[async_trait]
impl Dictionary for DaumDictionary {
    fn name(&self) -> &str {
        "Daum English"
    }

    async fn define(&self, word: &str) -> Result<String, LookupError> {
        let query = word.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("dic", "eng"), ("search_first", "Y")])
            .build()
            .map_err(|e| LookupError::Network {
                url: self.endpoint.clone(),
                message: e.to_string(),
            })?;
        let url = request.url().to_string();
        tracing::debug!("fetching {url}");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| LookupError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| LookupError::Body {
            url: url.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!("received {} bytes from {url}", body.len());

        Ok(definition_block(&body))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use super::*;
    use crate::sections::tests::RESULT_PAGE;

    /// Serve one canned response and hand back the request line
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/search.do", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let request = String::from_utf8_lossy(&request);
            let request_line = request.lines().next().unwrap_or_default().to_string();
            let _ = tx.send(request_line);

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (endpoint, rx)
    }

    #[tokio::test]
    async fn fetches_and_renders_result_page() {
        let (endpoint, request_line) = serve_once("200 OK", RESULT_PAGE).await;
        let dictionary = DaumDictionary::new(endpoint, Duration::from_secs(5)).unwrap();

        let block = dictionary.define("ephemeral").await.unwrap();
        assert!(block.starts_with("# Related Words\nephemera ephemerality \n\n# Word\nephemeral"));

        let request_line = request_line.await.unwrap();
        assert_eq!(
            request_line,
            "GET /search.do?q=ephemeral&dic=eng&search_first=Y HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn query_is_escaped() {
        let (endpoint, request_line) = serve_once("200 OK", "<html></html>").await;
        let dictionary = DaumDictionary::new(endpoint, Duration::from_secs(5)).unwrap();

        assert_eq!(dictionary.define("ice cream&co").await.unwrap(), "");
        let request_line = request_line.await.unwrap();
        assert!(request_line.starts_with("GET /search.do?q=ice+cream%26co&dic=eng"));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (endpoint, _request_line) = serve_once("503 Service Unavailable", "busy").await;
        let dictionary = DaumDictionary::new(endpoint, Duration::from_secs(5)).unwrap();

        let err = dictionary.define("word").await.unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/search.do", listener.local_addr().unwrap());
        drop(listener);

        let dictionary = DaumDictionary::new(endpoint, Duration::from_secs(5)).unwrap();
        let err = dictionary.define("word").await.unwrap_err();
        assert!(matches!(err, LookupError::Network { .. }));
    }

    #[tokio::test]
    async fn slow_host_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/search.do", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let dictionary = DaumDictionary::new(endpoint, Duration::from_millis(200)).unwrap();
        let err = dictionary.define("word").await.unwrap_err();
        assert!(matches!(err, LookupError::Network { .. }));
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let dictionary =
            DaumDictionary::new("http://127.0.0.1:9/search.do".into(), Duration::from_secs(1))
                .unwrap();
        assert!(matches!(
            dictionary.define("  ").await,
            Err(LookupError::EmptyQuery)
        ));
    }
}
