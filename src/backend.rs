use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::api_types::{
    ApiHeadlineScores, ApiRelatedArticle, ApiTrends, ApiTrendsBody, HeadlineRequest,
    TextCategoryRequest,
};
use crate::config::Settings;
use crate::error::{CallError, ConfigError};

pub const TRENDS_PATH: &str = "trends";
pub const HEADLINE_PATH: &str = "headline";
pub const RELATED_PATH: &str = "urls";

/// Remote analysis backend: trends, headline scoring, related articles.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn trends(&self, req: &TextCategoryRequest) -> Result<ApiTrends, CallError>;
    async fn headline(&self, req: &HeadlineRequest) -> Result<ApiHeadlineScores, CallError>;
    async fn related(&self, req: &TextCategoryRequest)
        -> Result<Vec<ApiRelatedArticle>, CallError>;
}

/// Shared reqwest client for both collaborators.
pub fn build_http_client(settings: &Settings) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(settings.user_agent.clone());
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(client: Client, mut base: Url) -> Self {
        // Url::join drops the last path segment unless the base ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    pub fn from_settings(client: Client, settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self::new(client, settings.backend_base()?))
    }

    pub fn endpoint(&self, path: &str) -> String {
        self.base
            .join(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}{}", self.base, path))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, CallError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        let start = std::time::Instant::now();

        debug!("Backend request - POST {}", url);

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| CallError::from_reqwest(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CallError::Status {
                endpoint: url,
                status,
            });
        }

        let parsed: T = resp
            .json()
            .await
            .map_err(|e| CallError::from_reqwest(&url, e))?;

        info!(
            "Backend request completed - endpoint=/{}, duration={:.2}s",
            path,
            start.elapsed().as_secs_f32()
        );
        Ok(parsed)
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn trends(&self, req: &TextCategoryRequest) -> Result<ApiTrends, CallError> {
        let body: ApiTrendsBody = self.post_json(TRENDS_PATH, req).await?;
        Ok(body.into_inner())
    }

    async fn headline(&self, req: &HeadlineRequest) -> Result<ApiHeadlineScores, CallError> {
        self.post_json(HEADLINE_PATH, req).await
    }

    async fn related(
        &self,
        req: &TextCategoryRequest,
    ) -> Result<Vec<ApiRelatedArticle>, CallError> {
        self.post_json(RELATED_PATH, req).await
    }
}
