//! Blocking client for the library server's series endpoints.

use std::time::Duration;

use crate::error::RemoteError;
use crate::types::{RemoteSeries, SeriesPage};

const PAGE_SIZE: usize = 100;

pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    /// Build a client for an API base URL (e.g. `http://nas:25600/api/v1`).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, RemoteError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .header("X-API-Key", &self.api_key)
            .header("Accept", "application/json")
            .json(body)
            .send()?;
        if !response.status().is_success() {
            return Err(RemoteError::Api {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(response)
    }

    /// Page through every series known to the server.
    pub fn list_series(&self) -> Result<Vec<RemoteSeries>, RemoteError> {
        let mut all = Vec::new();
        for page in 0.. {
            let response = self.post(
                &format!("/series/list?page={page}&size={PAGE_SIZE}"),
                &serde_json::json!({}),
            )?;
            let page_data: SeriesPage = response.json()?;
            all.extend(page_data.content);
            if page_data.last {
                break;
            }
        }
        Ok(all)
    }

    /// Set a series title server-side, locking it so a library rescan
    /// cannot overwrite the correction.
    pub fn update_series_title(&self, series_id: &str, title: &str) -> Result<(), RemoteError> {
        let body = serde_json::json!({
            "title": title,
            "titleLock": true,
            "sortTitle": title,
            "sortTitleLock": true,
        });
        self.post(&format!("/series/{series_id}/metadata"), &body)?;
        Ok(())
    }
}
