use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::CommonError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; kr-book-info/0.1)";

#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    pub user_agent: String,
}

impl HttpClientConfig {
    /// Optional:
    /// - `BOOK_HTTP_USER_AGENT`: overrides the `User-Agent` header sent to the bookstore
    pub fn from_env() -> Self {
        let user_agent = std::env::var("BOOK_HTTP_USER_AGENT")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self { user_agent }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Text transport used by the lookup pipeline.
///
/// Every request is a plain GET. A non-success status is reported as an error so callers
/// never try to parse an error page as a result page.
#[async_trait]
pub trait FetchText: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, CommonError>;
}

#[derive(Clone)]
pub struct HttpClient {
    config: HttpClientConfig,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl FetchText for HttpClient {
    async fn fetch_text(&self, url: &str) -> Result<String, CommonError> {
        debug!(url, "GET");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CommonError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.bytes().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Percent-encode a free-text value for use as a query parameter.
pub fn encode_query(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Resolve a site-relative location against a base URL. Absolute locations win.
pub fn join_url(base: &str, location: &str) -> Result<String, CommonError> {
    let joined = Url::parse(base)?.join(location)?;
    Ok(joined.to_string())
}
