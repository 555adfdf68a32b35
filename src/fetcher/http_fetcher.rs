use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{NewsdeskError, Result};
use crate::config::ApiConfig;
use crate::domain::{Article, FeedPage, PageWindow};
use crate::fetcher::Fetcher;

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the News API `top-headlines` endpoint.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    country: String,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        match api.resolved_key() {
            Some(key) => {
                let mut value = HeaderValue::from_str(&key)
                    .map_err(|e| NewsdeskError::Config(format!("Invalid API key: {}", e)))?;
                value.set_sensitive(true);
                headers.insert(API_KEY_HEADER, value);
            }
            None => {
                tracing::warn!("No News API key configured; requests will be rejected");
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.clone(),
            country: api.country.clone(),
            timeout_secs: api.timeout_secs,
        })
    }

    fn request_url(&self, window: PageWindow) -> Result<Url> {
        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("country", self.country.clone()),
                ("category", window.category.to_string()),
                ("page", window.page.to_string()),
                ("pageSize", window.page_size().to_string()),
            ],
        )?;
        Ok(url)
    }

    fn map_error(&self, err: reqwest::Error) -> NewsdeskError {
        if err.is_timeout() {
            NewsdeskError::Timeout(self.timeout_secs)
        } else {
            NewsdeskError::Http(err)
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, window: PageWindow) -> Result<FeedPage> {
        let url = self.request_url(window)?;
        tracing::debug!(
            "Fetching {} page {} from {}",
            window.category,
            window.page,
            self.base_url
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        parse_response(status, &body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeadlinesResponse {
    status: Option<String>,
    total_results: Option<u32>,
    articles: Option<Vec<Article>>,
    code: Option<String>,
    message: Option<String>,
}

impl HeadlinesResponse {
    fn error_message(&self) -> Option<String> {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
            (None, Some(message)) => Some(message.clone()),
            (Some(code), None) => Some(code.clone()),
            (None, None) => None,
        }
    }
}

/// Turn an HTTP status and body into a page or a fetch error.
pub(crate) fn parse_response(status: u16, body: &[u8]) -> Result<FeedPage> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<HeadlinesResponse>(body)
            .ok()
            .and_then(|r| r.error_message())
            .unwrap_or_else(|| format!("HTTP status {}", status));
        return Err(NewsdeskError::Api { status, message });
    }

    let response: HeadlinesResponse = serde_json::from_slice(body)?;

    if response.status.as_deref() == Some("error") {
        return Err(NewsdeskError::Api {
            status,
            message: response
                .error_message()
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    Ok(FeedPage {
        articles: response.articles.unwrap_or_default(),
        total_results: response.total_results.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn api_config() -> ApiConfig {
        ApiConfig {
            base_url: "https://newsapi.org/v2/top-headlines".into(),
            country: "us".into(),
            key: Some("test-key".into()),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_request_url() {
        let fetcher = HttpFetcher::new(&api_config()).unwrap();
        let url = fetcher
            .request_url(PageWindow::new(Category::Science, 3))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://newsapi.org/v2/top-headlines?country=us&category=science&page=3&pageSize=10"
        );
    }

    #[test]
    fn test_parse_ok_response() {
        let body = br#"{
            "status": "ok",
            "totalResults": 38,
            "articles": [
                {"title": "First", "publishedAt": "2024-01-02T00:00:00Z"},
                {"title": "Second", "description": "More"}
            ]
        }"#;
        let page = parse_response(200, body).unwrap();
        assert_eq!(page.total_results, 38);
        assert_eq!(page.articles.len(), 2);
        assert_eq!(page.articles[0].key(), "First");
        assert_eq!(page.articles[1].description.as_deref(), Some("More"));
    }

    #[test]
    fn test_parse_missing_fields_is_empty_page() {
        let page = parse_response(200, br#"{"status": "ok"}"#).unwrap();
        assert_eq!(page, FeedPage::default());
    }

    #[test]
    fn test_parse_error_status_with_body() {
        let body = br#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#;
        let err = parse_response(401, body).unwrap_err();
        match err {
            NewsdeskError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "apiKeyInvalid: Your API key is invalid.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_status_without_body() {
        let err = parse_response(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(
            err,
            NewsdeskError::Api { status: 502, ref message } if message == "HTTP status 502"
        ));
    }

    #[test]
    fn test_parse_error_in_ok_status() {
        let body = br#"{"status": "error", "message": "rate limited"}"#;
        let err = parse_response(200, body).unwrap_err();
        assert!(matches!(err, NewsdeskError::Api { ref message, .. } if message == "rate limited"));
    }

    #[tokio::test]
    async fn test_unresponsive_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections and hold them open without replying
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = ApiConfig {
            base_url: format!("http://{}/v2/top-headlines", addr),
            timeout_secs: 1,
            ..api_config()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let err = fetcher
            .fetch_page(PageWindow::first(Category::General))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsdeskError::Timeout(1)));
        assert_eq!(err.to_string(), "Request timed out after 1s");

        server.abort();
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_response(200, b"not json").unwrap_err();
        assert!(matches!(err, NewsdeskError::Decode(_)));
    }
}
