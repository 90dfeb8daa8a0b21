use reqwest::StatusCode;
use tracing::debug;

use crate::error::{FemError, Result};

pub const DEFAULT_API_URL: &str = "https://api.frontendmasters.com/v2/kabuki/courses/";

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const API_URL_ENV_VAR: &str = "FEMNOTES_API_URL";

/// Source of raw course payloads, keyed by course slug.
pub trait CourseFetcher {
    async fn fetch(&self, slug: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Default configuration, with the base URL taken from the environment if set.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV_VAR) {
            Ok(base_url) if !base_url.is_empty() => Self { base_url },
            _ => Self::default(),
        }
    }

    pub fn course_url(&self, slug: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, slug)
        } else {
            format!("{}/{}", self.base_url, slug)
        }
    }
}

/// Fetches course payloads from the Frontend Masters API.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

impl CourseFetcher for ApiClient {
    async fn fetch(&self, slug: &str) -> Result<Vec<u8>> {
        let url = self.config.course_url(slug);
        debug!(%url, "fetching course");

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FemError::CourseNotFound {
                slug: slug.to_string(),
            });
        }

        let body = response.error_for_status()?.bytes().await?;
        Ok(body.to_vec())
    }
}
