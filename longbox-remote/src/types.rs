//! Response payloads from the library server.

use serde::Deserialize;

/// One page of the paged series listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesPage {
    pub content: Vec<RemoteSeries>,
    pub last: bool,
}

/// A series as the server reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSeries {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub oneshot: bool,
    pub metadata: RemoteSeriesMetadata,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSeriesMetadata {
    pub title: Option<String>,
    #[serde(default)]
    pub title_lock: bool,
}
