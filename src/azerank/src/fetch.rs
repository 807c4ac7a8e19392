//! Ranking dataset retrieval
//!
//! Datasets are addressed by a resource name built from class, spec, slot
//! and fight style, e.g. `paladin_retribution_shoulders_patchwerk.json`.
//! A [`RankingSource`] turns a request for one slot into a dataset;
//! [`fetch_datasets`] retrieves all three slots concurrently and fails as a
//! unit.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::dataset::{RankingDataset, SlotDatasets};
use crate::slot::ItemSlot;

/// Published azerite trait datasets
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/Bloodmallet/bloodmallet.github.io/master/json/azerite_traits";

/// Single-target fight style
pub const DEFAULT_FIGHT_STYLE: &str = "patchwerk";

/// HTTP timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while retrieving a dataset
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Invalid dataset {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset task failed: {0}")]
    Task(String),
}

/// Class, spec and fight style identifying a set of datasets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRequest {
    pub class_name: String,
    pub spec: String,
    pub fight_style: String,
}

impl DatasetRequest {
    pub fn new(class_name: impl Into<String>, spec: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            spec: spec.into(),
            fight_style: DEFAULT_FIGHT_STYLE.to_string(),
        }
    }

    pub fn with_fight_style(mut self, fight_style: impl Into<String>) -> Self {
        self.fight_style = fight_style.into();
        self
    }

    /// File name of the dataset for a slot
    pub fn resource_name(&self, slot: ItemSlot) -> String {
        format!(
            "{}_{}_{}_{}.json",
            self.class_name,
            self.spec,
            slot.dataset_slug(),
            self.fight_style
        )
    }
}

/// Something that can produce the dataset for one slot
pub trait RankingSource: Send + Sync {
    fn fetch(&self, request: &DatasetRequest, slot: ItemSlot) -> Result<RankingDataset, FetchError>;
}

/// Datasets served over HTTP
pub struct HttpSource {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("azerank/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, request: &DatasetRequest, slot: ItemSlot) -> String {
        format!("{}/{}", self.base_url, request.resource_name(slot))
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

impl RankingSource for HttpSource {
    fn fetch(&self, request: &DatasetRequest, slot: ItemSlot) -> Result<RankingDataset, FetchError> {
        let url = self.url_for(request, slot);
        tracing::debug!(%url, "fetching dataset");

        let response = self.agent.get(&url).call().map_err(|err| match err {
            ureq::Error::Status(status, _) => FetchError::Status {
                url: url.clone(),
                status,
            },
            ureq::Error::Transport(transport) => FetchError::Transport {
                url: url.clone(),
                message: transport.to_string(),
            },
        })?;

        serde_json::from_reader(response.into_reader()).map_err(|source| FetchError::Decode {
            resource: url,
            source,
        })
    }
}

/// Datasets stored as files in a local directory
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RankingSource for DirectorySource {
    fn fetch(&self, request: &DatasetRequest, slot: ItemSlot) -> Result<RankingDataset, FetchError> {
        let path = self.root.join(request.resource_name(slot));
        tracing::debug!(path = %path.display(), "reading dataset");

        let json = std::fs::read_to_string(&path).map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?;

        RankingDataset::from_json(&json).map_err(|source| FetchError::Decode {
            resource: path.display().to_string(),
            source,
        })
    }
}

/// Retrieve the head, chest and shoulder datasets concurrently
///
/// Either all three datasets are returned or the first failure is. A
/// failure does not stop the other retrievals, their results are dropped.
pub async fn fetch_datasets(
    source: Arc<dyn RankingSource>,
    request: &DatasetRequest,
) -> Result<SlotDatasets, FetchError> {
    let fetch_slot = |slot: ItemSlot| {
        let source = Arc::clone(&source);
        let request = request.clone();
        async move {
            tokio::task::spawn_blocking(move || source.fetch(&request, slot))
                .await
                .map_err(|e| FetchError::Task(e.to_string()))
                .and_then(|result| result)
        }
    };

    let (head, chest, shoulders) = tokio::try_join!(
        fetch_slot(ItemSlot::Head),
        fetch_slot(ItemSlot::Chest),
        fetch_slot(ItemSlot::Shoulder),
    )?;

    tracing::info!(
        class = %request.class_name,
        spec = %request.spec,
        fight_style = %request.fight_style,
        "fetched ranking datasets"
    );

    Ok(SlotDatasets {
        head,
        chest,
        shoulders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dataset_json(name: &str, id: u32, value: f64) -> serde_json::Value {
        serde_json::json!({
            "data": { name: { "1_340": value } },
            "item_ids": { name: id },
            "used_azerite_traits_per_item": {}
        })
    }

    #[test]
    fn test_resource_names() {
        let request = DatasetRequest::new("death_knight", "unholy");
        assert_eq!(
            request.resource_name(ItemSlot::Head),
            "death_knight_unholy_head_patchwerk.json"
        );
        assert_eq!(
            request.resource_name(ItemSlot::Shoulder),
            "death_knight_unholy_shoulders_patchwerk.json"
        );
        let request = request.with_fight_style("hecticaddcleave");
        assert_eq!(
            request.resource_name(ItemSlot::Chest),
            "death_knight_unholy_chest_hecticaddcleave.json"
        );
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let source = HttpSource::new("http://localhost:8080/json/", DEFAULT_TIMEOUT);
        let request = DatasetRequest::new("paladin", "retribution");
        assert_eq!(
            source.url_for(&request, ItemSlot::Head),
            "http://localhost:8080/json/paladin_retribution_head_patchwerk.json"
        );
    }

    #[test]
    fn test_directory_source_reads_and_reports_missing() {
        let dir = TempDir::new().unwrap();
        let request = DatasetRequest::new("paladin", "retribution");
        std::fs::write(
            dir.path().join(request.resource_name(ItemSlot::Head)),
            dataset_json("Helm", 1, 10.0).to_string(),
        )
        .unwrap();

        let source = DirectorySource::new(dir.path());
        let head = source.fetch(&request, ItemSlot::Head).unwrap();
        assert_eq!(head.item_ids["Helm"], "1");

        let err = source.fetch(&request, ItemSlot::Chest).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn test_directory_source_decode_error() {
        let dir = TempDir::new().unwrap();
        let request = DatasetRequest::new("paladin", "retribution");
        std::fs::write(dir.path().join(request.resource_name(ItemSlot::Chest)), "not json").unwrap();

        let err = DirectorySource::new(dir.path())
            .fetch(&request, ItemSlot::Chest)
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_datasets_over_http() {
        let server = MockServer::start().await;
        for (slot, name, id) in [("head", "Helm", 1), ("chest", "Vest", 2), ("shoulders", "Pads", 3)] {
            Mock::given(method("GET"))
                .and(path(format!("/paladin_retribution_{}_patchwerk.json", slot)))
                .respond_with(ResponseTemplate::new(200).set_body_json(dataset_json(name, id, 1.0)))
                .mount(&server)
                .await;
        }

        let source: Arc<dyn RankingSource> = Arc::new(HttpSource::new(&server.uri(), DEFAULT_TIMEOUT));
        let request = DatasetRequest::new("paladin", "retribution");
        let datasets = fetch_datasets(source, &request).await.unwrap();

        assert_eq!(datasets.head.item_ids["Helm"], "1");
        assert_eq!(datasets.chest.item_ids["Vest"], "2");
        assert_eq!(datasets.shoulders.item_ids["Pads"], "3");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_datasets_fails_as_unit() {
        let server = MockServer::start().await;
        for (slot, name) in [("head", "Helm"), ("chest", "Vest")] {
            Mock::given(method("GET"))
                .and(path(format!("/paladin_retribution_{}_patchwerk.json", slot)))
                .respond_with(ResponseTemplate::new(200).set_body_json(dataset_json(name, 1, 1.0)))
                .mount(&server)
                .await;
        }

        let source: Arc<dyn RankingSource> = Arc::new(HttpSource::new(&server.uri(), DEFAULT_TIMEOUT));
        let request = DatasetRequest::new("paladin", "retribution");
        let err = fetch_datasets(source, &request).await.unwrap_err();

        match err {
            FetchError::Status { url, status } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("paladin_retribution_shoulders_patchwerk.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_datasets_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not found</html>"))
            .mount(&server)
            .await;

        let source: Arc<dyn RankingSource> = Arc::new(HttpSource::new(&server.uri(), DEFAULT_TIMEOUT));
        let err = fetch_datasets(source, &DatasetRequest::new("", "")).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
