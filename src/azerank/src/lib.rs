//! # azerank
//!
//! Azerite item ranking library - export parsing, ranking datasets, and
//! correlation.
//!
//! This library provides functionality to:
//! - Parse azerite item lines and character metadata from a character export
//! - Retrieve the per-slot ranking datasets for a class and spec
//! - Rank the exported items of each slot by their published values
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use azerank::{HttpSource, Pipeline, PipelineOptions, RankingOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let export = std::fs::read_to_string("export.txt")?;
//! let pipeline = Pipeline::new(Arc::new(HttpSource::default()), PipelineOptions::default());
//!
//! let run = pipeline.run(&export).await;
//! match run.outcome {
//!     RankingOutcome::Ranked(result) => {
//!         for (slot, ranking) in result.iter() {
//!             println!("{}: {} items", slot, ranking.len());
//!         }
//!     }
//!     RankingOutcome::FetchFailed(err) => eprintln!("{}", err),
//! }
//! # Ok(())
//! # }
//! ```

pub mod correlate;
pub mod dataset;
pub mod fetch;
pub mod metadata;
pub mod parser;
pub mod pipeline;
pub mod publish;
pub mod reference;
pub mod slot;

#[doc(inline)]
pub use correlate::{correlate, rank_slot, PipelineResult, RankedItem, SlotRanking};
#[doc(inline)]
pub use dataset::{AzeriteTrait, RankValues, RankingDataset, SlotDatasets};
#[doc(inline)]
pub use fetch::{
    fetch_datasets, DatasetRequest, DirectorySource, FetchError, HttpSource, RankingSource,
    DEFAULT_BASE_URL, DEFAULT_FIGHT_STYLE, DEFAULT_TIMEOUT,
};
#[doc(inline)]
pub use metadata::{extract_metadata, CharacterMetadata};
#[doc(inline)]
pub use parser::{parse_items, parse_line, ItemLevelPolicy, ItemScan, ParsedItem, Rejection};
#[doc(inline)]
pub use pipeline::{parse_export, ParsedExport, Pipeline, PipelineOptions, PipelineRun, RankingOutcome};
#[doc(inline)]
pub use publish::{Generation, Published, ResultStore};
#[doc(inline)]
pub use reference::{
    class_by_token, is_known_spec, ClassInfo, CLASSES, DEFAULT_ITEM_LEVEL, REFERENCE_LEVEL,
    THRESHOLD_LEVELS,
};
#[doc(inline)]
pub use slot::ItemSlot;
