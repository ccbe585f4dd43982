//! Baseline document sources.
//!
//! The baseline is the shipped default content. Hosts serve it as a static
//! asset; the CLI reads it from disk.

use std::path::PathBuf;

use async_trait::async_trait;

use grc_domain::CategoryTree;

use crate::infrastructure::ports::{BaselineError, BaselineSource};

/// Reads the baseline from a JSON file.
pub struct FileBaselineSource {
    path: PathBuf,
}

impl FileBaselineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BaselineSource for FileBaselineSource {
    async fn fetch(&self) -> Result<CategoryTree, BaselineError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| BaselineError::unreachable(self.location(), e))?;
        serde_json::from_str(&text).map_err(|e| BaselineError::invalid(self.location(), e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the baseline from the host over HTTP.
pub struct HttpBaselineSource {
    client: reqwest::Client,
    url: String,
}

impl HttpBaselineSource {
    /// `base_url` is the host's asset root; the module path is appended.
    pub fn new(base_url: &str) -> Self {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            grc_shared::storage_keys::BASELINE_PATH
        );
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BaselineSource for HttpBaselineSource {
    async fn fetch(&self) -> Result<CategoryTree, BaselineError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BaselineError::unreachable(&self.url, e))?;

        if !response.status().is_success() {
            return Err(BaselineError::unreachable(
                &self.url,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .json::<CategoryTree>()
            .await
            .map_err(|e| BaselineError::invalid(&self.url, e))
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}
