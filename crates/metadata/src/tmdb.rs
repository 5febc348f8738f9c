//! TMDB (The Movie Database) catalog client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::time::Duration;

use cinedeck_core::types::{MediaKind, TimeWindow, TrendingScope};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::provider::{CatalogProvider, MovieList, SearchScope, TvList};
use crate::{CatalogError, MediaSummary, MovieDetails, Page, SeasonDetails, TvDetails};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const LANGUAGE: &str = "en-US";

/// Connection settings for [`TmdbClient`].
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.trim().is_empty() {
            return Err(CatalogError::Config("TMDB API key is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Config(format!("build HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, CatalogError> {
        let mut all_params = vec![("api_key", self.api_key.as_str()), ("language", LANGUAGE)];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(CatalogError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| CatalogError::Provider(format!("parse JSON: {e}")))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let data = self.get_json(path, params).await?;
        decode(data)
    }

    async fn get_page(
        &self,
        path: &str,
        params: &[(&str, &str)],
        page: u32,
    ) -> Result<Page<MediaSummary>, CatalogError> {
        let page = page.max(1).to_string();
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("page", page.as_str()));
        self.get(path, &all_params).await
    }
}

fn decode<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, CatalogError> {
    serde_json::from_value(data).map_err(|e| CatalogError::Provider(format!("decode: {e}")))
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn trending(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
    ) -> Result<Page<MediaSummary>, CatalogError> {
        self.get(&format!("/trending/{scope}/{window}"), &[]).await
    }

    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<Page<MediaSummary>, CatalogError> {
        self.get_page(&format!("/movie/{}", list.as_str()), &[], page)
            .await
    }

    async fn tv_list(&self, list: TvList, page: u32) -> Result<Page<MediaSummary>, CatalogError> {
        self.get_page(&format!("/tv/{}", list.as_str()), &[], page)
            .await
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        self.get(
            &format!("/movie/{id}"),
            &[(
                "append_to_response",
                "credits,videos,recommendations,release_dates",
            )],
        )
        .await
    }

    async fn tv_details(&self, id: u64) -> Result<TvDetails, CatalogError> {
        self.get(
            &format!("/tv/{id}"),
            &[(
                "append_to_response",
                "credits,videos,recommendations,content_ratings",
            )],
        )
        .await
    }

    async fn season_details(
        &self,
        tv_id: u64,
        season: u32,
    ) -> Result<SeasonDetails, CatalogError> {
        self.get(&format!("/tv/{tv_id}/season/{season}"), &[]).await
    }

    async fn search(
        &self,
        scope: SearchScope,
        query: &str,
        page: u32,
    ) -> Result<Page<MediaSummary>, CatalogError> {
        self.get_page(
            &format!("/search/{}", scope.as_str()),
            &[("query", query)],
            page,
        )
        .await
    }

    async fn discover(
        &self,
        kind: MediaKind,
        filters: &[(String, String)],
        page: u32,
    ) -> Result<Page<MediaSummary>, CatalogError> {
        let params: Vec<(&str, &str)> = filters
            .iter()
            .filter(|(k, _)| k != "page")
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.get_page(&format!("/discover/{kind}"), &params, page)
            .await
    }
}
