//! Rank command handler

use std::sync::Arc;

use anyhow::{bail, Result};
use azerank::{
    DirectorySource, HttpSource, Pipeline, PipelineOptions, RankingOutcome, RankingSource,
};

use super::parse::ilvl_policy;
use crate::cli::{OutputFormat, RankArgs};
use crate::config::Config;
use crate::file_io;
use crate::render::{self, RankReport};

/// Handle `rank`
pub async fn handle(args: RankArgs) -> Result<()> {
    let config = Config::load()?;
    let text = file_io::read_input(args.input.as_deref())?;

    let output = rank(&args, &config, &text).await?;
    file_io::write_output(args.output.as_deref(), &output)
}

/// Run the pipeline on `text` and render the rankings
async fn rank(args: &RankArgs, config: &Config, text: &str) -> Result<String> {
    let pipeline = Pipeline::new(ranking_source(args, config), pipeline_options(args, config));
    let run = pipeline.run(text).await;

    match &run.outcome {
        RankingOutcome::Ranked(result) => match args.format {
            OutputFormat::Table => Ok(render::rankings_table(&run.export.metadata, result)),
            OutputFormat::Json => render::to_json(&RankReport {
                metadata: &run.export.metadata,
                rejected: run.export.rejected,
                rankings: result,
            }),
        },
        RankingOutcome::FetchFailed(err) => {
            eprint!("{}", render::items_table(&run.export));
            bail!("Failed to fetch ranking datasets: {}", err)
        }
    }
}

fn ranking_source(args: &RankArgs, config: &Config) -> Arc<dyn RankingSource> {
    if let Some(dir) = &args.datasets_dir {
        return Arc::new(DirectorySource::new(dir));
    }

    let base_url = args.base_url.as_deref().unwrap_or_else(|| config.base_url());
    let timeout = args
        .timeout
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| config.timeout());
    tracing::debug!(base_url, ?timeout, "using HTTP datasets");
    Arc::new(HttpSource::new(base_url, timeout))
}

fn pipeline_options(args: &RankArgs, config: &Config) -> PipelineOptions {
    PipelineOptions {
        ilvl_policy: ilvl_policy(args.ilvl_from_bonus),
        reference_level: args.reference_level,
        fight_style: args
            .fight_style
            .clone()
            .unwrap_or_else(|| config.fight_style().to_string()),
        class_override: args.class_name.clone(),
        spec_override: args.spec.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const EXPORT: &str = "\
paladin=\"Lightbringer\"
spec=retribution
head=,id=159302,bonus_id=4819/1512/4786,reforge=0,azerite_powers=30/461/21/13
# head=,id=159303,bonus_id=4819/1537/4786,reforge=0,azerite_powers=30/461/21/13
chest=,id=165822,bonus_id=4824/1517/4786,reforge=0,azerite_powers=560/22/13
";

    fn args(dir: &Path, format: OutputFormat) -> RankArgs {
        RankArgs {
            input: None,
            class_name: None,
            spec: None,
            fight_style: None,
            base_url: None,
            datasets_dir: Some(dir.to_path_buf()),
            timeout: None,
            ilvl_from_bonus: false,
            reference_level: azerank::REFERENCE_LEVEL,
            format,
            output: None,
        }
    }

    fn write_datasets(dir: &Path) {
        let head = serde_json::json!({
            "data": {
                "Helm of Honor": { "1_340": 120.0 },
                "Crown of the Seas": { "1_340": 150.0 }
            },
            "item_ids": { "Helm of Honor": 159302, "Crown of the Seas": 159303 }
        });
        let chest = serde_json::json!({
            "data": { "Sunscale Chestguard": { "1_340": 210.0 } },
            "item_ids": { "Sunscale Chestguard": 165822 }
        });
        let shoulders = serde_json::json!({ "data": {}, "item_ids": {} });
        for (slot, body) in [("head", head), ("chest", chest), ("shoulders", shoulders)] {
            let file = format!("paladin_retribution_{}_patchwerk.json", slot);
            std::fs::write(dir.join(file), body.to_string()).unwrap();
        }
    }

    #[tokio::test]
    async fn test_rank_table() {
        let dir = TempDir::new().unwrap();
        write_datasets(dir.path());

        let output = rank(&args(dir.path(), OutputFormat::Table), &Config::default(), EXPORT)
            .await
            .unwrap();
        let crown = output.find("Crown of the Seas").unwrap();
        let helm = output.find("Helm of Honor").unwrap();
        assert!(crown < helm);
        assert!(output.contains("Sunscale Chestguard"));
    }

    #[tokio::test]
    async fn test_rank_json() {
        let dir = TempDir::new().unwrap();
        write_datasets(dir.path());

        let output = rank(&args(dir.path(), OutputFormat::Json), &Config::default(), EXPORT)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["rankings"]["head"][0]["name"], "Crown of the Seas");
        assert_eq!(value["rankings"]["chest"][0]["id"], "165822");
        assert!(value["rankings"]["shoulder"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_datasets_fail() {
        let dir = TempDir::new().unwrap();
        let err = rank(&args(dir.path(), OutputFormat::Table), &Config::default(), EXPORT)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to fetch ranking datasets"));
    }

    #[test]
    fn test_flags_override_config() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            fight_style: Some("hecticaddcleave".to_string()),
            ..Default::default()
        };
        let mut rank_args = args(dir.path(), OutputFormat::Table);
        assert_eq!(pipeline_options(&rank_args, &config).fight_style, "hecticaddcleave");

        rank_args.fight_style = Some("beastlord".to_string());
        rank_args.class_name = Some("warrior".to_string());
        rank_args.ilvl_from_bonus = true;
        let options = pipeline_options(&rank_args, &config);
        assert_eq!(options.fight_style, "beastlord");
        assert_eq!(options.class_override.as_deref(), Some("warrior"));
        assert_eq!(options.ilvl_policy, azerank::ItemLevelPolicy::BonusCode);
    }
}
