//! Catalog and detail fetchers for the paginated character listing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{CatalogPage, Character},
    error::ErrorCode,
};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {source}")]
    Client { source: reqwest::Error },
    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("invalid payload from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::NetworkFailure
    }
}

/// Upstream collaborator serving catalog pages and single records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one 1-based page of the listing.
    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, CatalogError>;
    /// Fetch one record by the opaque lookup URI captured from the listing.
    async fn fetch_character(&self, uri: &str) -> Result<Character, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(catalog_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url = Url::parse(catalog_url).map_err(|source| CatalogError::InvalidUrl {
            url: catalog_url.to_string(),
            source,
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| CatalogError::Client { source })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Page 1 is the bare listing URL; later pages add `?page=N`.
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        if page > 1 {
            url.query_pairs_mut()
                .append_pair("page", &page.to_string());
        }
        url
    }

    /// Download a display asset (portrait) referenced by a record.
    pub async fn fetch_asset(&self, uri: &str) -> Result<Vec<u8>, CatalogError> {
        let url = Url::parse(uri).map_err(|source| CatalogError::InvalidUrl {
            url: uri.to_string(),
            source,
        })?;
        let response = self.send(url.clone()).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| CatalogError::Decode {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, CatalogError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self.send(url.clone()).await?;
        response.json::<T>().await.map_err(|source| CatalogError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, CatalogError> {
        self.get_json(self.page_url(page)).await
    }

    async fn fetch_character(&self, uri: &str) -> Result<Character, CatalogError> {
        let url = Url::parse(uri).map_err(|source| CatalogError::InvalidUrl {
            url: uri.to_string(),
            source,
        })?;
        self.get_json(url).await
    }
}

/// Fetch every page in order, one request at a time, and flatten the results.
///
/// Any failed page abandons the whole load; nothing fetched so far is returned.
pub async fn load_all_characters<S>(source: &S) -> Result<Vec<Character>, CatalogError>
where
    S: CatalogSource + ?Sized,
{
    let first = source.fetch_page(1).await?;
    let pages = first.info.pages;
    let mut characters = first.results;
    debug!(page = 1, pages, fetched = characters.len(), "catalog: fetched page");

    for page in 2..=pages {
        let next = source.fetch_page(page).await?;
        debug!(page, pages, fetched = next.results.len(), "catalog: fetched page");
        characters.extend(next.results);
    }

    info!(
        pages = pages.max(1),
        characters = characters.len(),
        "catalog: loaded"
    );
    Ok(characters)
}

pub async fn load_character<S>(source: &S, uri: &str) -> Result<Character, CatalogError>
where
    S: CatalogSource + ?Sized,
{
    let character = source.fetch_character(uri).await?;
    debug!(id = character.id.0, name = %character.name, "catalog: loaded character");
    Ok(character)
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
