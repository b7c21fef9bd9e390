use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    error::ApiErrorBody,
    protocol::{ListQuery, MoviePage, SearchQuery},
};
use tracing::debug;

use crate::{config::CatalogConfig, error::CatalogError};

/// Paginated movie listing service.
///
/// Both operations report the total number of results across every page, not
/// just the ones returned in this call.
#[async_trait]
pub trait RemoteCatalogClient: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError>;
    async fn list_default(&self, page: u32) -> Result<MoviePage, CatalogError>;
}

pub struct HttpCatalogClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> anyhow::Result<Self> {
        Self::with_http_client(Client::new(), config)
    }

    pub fn with_http_client(http: Client, config: &CatalogConfig) -> anyhow::Result<Self> {
        let base_url = config.normalized_base_url()?;
        let api_key = config
            .require_api_key()
            .context("cannot build catalog client")?
            .to_string();
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_page(response: Response) -> Result<MoviePage, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ApiErrorBody::parse(&body).and_then(|b| b.status_message);
            return Err(CatalogError::Response {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl RemoteCatalogClient for HttpCatalogClient {
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError> {
        debug!(query, page, "requesting catalog search");
        let response = self
            .http
            .get(format!("{}/search/movie", self.base_url))
            .query(&SearchQuery {
                api_key: &self.api_key,
                query,
                page,
            })
            .send()
            .await?;
        Self::read_page(response).await
    }

    async fn list_default(&self, page: u32) -> Result<MoviePage, CatalogError> {
        debug!(page, "requesting popular catalog listing");
        let response = self
            .http
            .get(format!("{}/movie/popular", self.base_url))
            .query(&ListQuery {
                api_key: &self.api_key,
                page,
            })
            .send()
            .await?;
        Self::read_page(response).await
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
