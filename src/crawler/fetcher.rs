//! HTTP fetcher implementation

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of fetching one task URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with a body
    Success { status_code: u16, body: String },

    /// Non-success HTTP status
    HttpError { status_code: u16 },

    /// Connection-level failure
    NetworkError { error: String },
}

/// Builds the HTTP client used for every fetch in a run
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// No retries here: transient failures surface as `NetworkError` and the
/// affected task is dropped. Retry policy belongs to whoever queues tasks,
/// not to the fetch itself.
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchOutcome::HttpError {
                    status_code: status.as_u16(),
                };
            }
            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchOutcome::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchOutcome::NetworkError { error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> HttpConfig {
        HttpConfig {
            user_agent: "Mozilla/5.0 (test)".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let outcome = fetch_url(&client, &format!("{}/page", server.uri())).await;
        match outcome {
            FetchOutcome::Success { status_code, body } => {
                assert_eq!(status_code, 200);
                assert_eq!(body, "hello");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let outcome = fetch_url(&client, &format!("{}/missing", server.uri())).await;
        assert!(matches!(
            outcome,
            FetchOutcome::HttpError { status_code: 404 }
        ));
    }
}
