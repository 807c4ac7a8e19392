//! Pipeline coordination
//!
//! A run goes export text → [`ParsedExport`] → [`DatasetRequest`] →
//! [`SlotDatasets`] → [`PipelineResult`]. Every stage takes the previous
//! stage's output by value or reference; nothing is shared between runs
//! except the [`ResultStore`] a run is published into.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::correlate::{correlate, PipelineResult};
use crate::fetch::{fetch_datasets, DatasetRequest, FetchError, RankingSource, DEFAULT_FIGHT_STYLE};
use crate::metadata::{extract_metadata, CharacterMetadata};
use crate::parser::{parse_items, ItemLevelPolicy, ParsedItem};
use crate::publish::ResultStore;
use crate::reference::{class_by_token, is_known_spec, REFERENCE_LEVEL};

/// Everything read from the export text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExport {
    pub metadata: CharacterMetadata,
    pub items: Vec<ParsedItem>,
    /// Azerite lines that did not yield an item
    pub rejected: usize,
}

/// Parse items and character metadata from an export
pub fn parse_export(text: &str, policy: ItemLevelPolicy) -> ParsedExport {
    let scan = parse_items(text, policy);
    let metadata = extract_metadata(text);

    tracing::info!(
        items = scan.items.len(),
        rejected = scan.rejected,
        class = metadata.class_name.as_deref().unwrap_or("-"),
        spec = metadata.spec.as_deref().unwrap_or("-"),
        "parsed export"
    );

    ParsedExport {
        metadata,
        items: scan.items,
        rejected: scan.rejected,
    }
}

/// How a run ended
#[derive(Debug)]
pub enum RankingOutcome {
    Ranked(PipelineResult),
    FetchFailed(FetchError),
}

impl RankingOutcome {
    pub fn result(&self) -> Option<&PipelineResult> {
        match self {
            Self::Ranked(result) => Some(result),
            Self::FetchFailed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Ranked(_) => None,
            Self::FetchFailed(err) => Some(err),
        }
    }
}

/// Output of one pipeline run
#[derive(Debug)]
pub struct PipelineRun {
    pub export: ParsedExport,
    pub outcome: RankingOutcome,
}

/// Options shared by every run of a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub ilvl_policy: ItemLevelPolicy,
    pub reference_level: u32,
    pub fight_style: String,
    /// Used instead of the class found in the export
    pub class_override: Option<String>,
    /// Used instead of the spec found in the export
    pub spec_override: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            ilvl_policy: ItemLevelPolicy::default(),
            reference_level: REFERENCE_LEVEL,
            fight_style: DEFAULT_FIGHT_STYLE.to_string(),
            class_override: None,
            spec_override: None,
        }
    }
}

/// Parses exports, fetches their datasets and ranks their items
pub struct Pipeline {
    source: Arc<dyn RankingSource>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(source: Arc<dyn RankingSource>, options: PipelineOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Build the dataset request for a parsed export
    ///
    /// Missing class or spec values are sent as empty strings; the request
    /// is still made and is expected to fail at the source.
    pub fn dataset_request(&self, metadata: &CharacterMetadata) -> DatasetRequest {
        let class_name = self
            .options
            .class_override
            .clone()
            .or_else(|| metadata.class_name.clone());
        let spec = self
            .options
            .spec_override
            .clone()
            .or_else(|| metadata.spec.clone());

        match (class_name.as_deref(), spec.as_deref()) {
            (None, _) | (_, None) => {
                tracing::warn!(class = ?class_name, spec = ?spec, "class or spec missing from export")
            }
            (Some(class), _) if class_by_token(class).is_none() => {
                tracing::warn!(class, "unrecognized class")
            }
            (Some(class), Some(spec)) if !is_known_spec(class, spec) => {
                tracing::warn!(class, spec, "unrecognized spec for class")
            }
            _ => {}
        }

        DatasetRequest::new(class_name.unwrap_or_default(), spec.unwrap_or_default())
            .with_fight_style(self.options.fight_style.clone())
    }

    /// Run the whole pipeline on one export
    pub async fn run(&self, text: &str) -> PipelineRun {
        let export = parse_export(text, self.options.ilvl_policy);
        let request = self.dataset_request(&export.metadata);

        let outcome = match fetch_datasets(Arc::clone(&self.source), &request).await {
            Ok(datasets) => {
                let result = correlate(&datasets, &export.items, self.options.reference_level);
                tracing::info!(
                    head = result.head.len(),
                    shoulder = result.shoulder.len(),
                    chest = result.chest.len(),
                    "ranked items"
                );
                RankingOutcome::Ranked(result)
            }
            Err(err) => {
                tracing::warn!(error = %err, "ranking datasets unavailable");
                RankingOutcome::FetchFailed(err)
            }
        };

        PipelineRun { export, outcome }
    }

    /// Run the pipeline and publish its output into `store`
    ///
    /// Returns whether the run was published; a run overtaken by a newer
    /// one is dropped.
    pub async fn run_and_publish(&self, text: &str, store: &ResultStore) -> bool {
        let generation = store.begin();
        let run = self.run(text).await;
        store.publish(generation, run)
    }
}
