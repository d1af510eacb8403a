//! Stage trait, stage implementations, and the linear pipeline runner.
//!
//! The pipeline is a strict three-step sequence with no branching and no
//! retries: extract, transform, write. Each stage pushes its result into the
//! [`TransferStore`] and the next stage pulls it by the producer's task id,
//! mirroring how an external scheduler would wire the steps together.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::EtlConfig;
use crate::errors::{EtlError, ParseError};
use crate::extract;
use crate::fetch::PageFetcher;
use crate::handoff::{TransferStore, ROWS_KEY};
use crate::records::{RawStadiumRow, StadiumRecord};
use crate::transform;
use crate::write;

/// Task id of the extraction stage.
pub const EXTRACT_TASK_ID: &str = "extract_data_from_wikipedia";
/// Task id of the transformation stage.
pub const TRANSFORM_TASK_ID: &str = "transform_wikipedia_data";
/// Task id of the write stage.
pub const WRITE_TASK_ID: &str = "write_wikipedia_data";

/// Identifies a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunIdentity {
    /// The unique ID for this run.
    pub run_id: Uuid,
}

impl RunIdentity {
    /// Creates a new run identity with a generated run ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
        }
    }
}

impl Default for RunIdentity {
    fn default() -> Self {
        Self::new()
    }
}

/// Static metadata describing the pipeline, mirroring its scheduler entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// The pipeline id.
    pub id: String,
    /// The owner recorded on the scheduler entry.
    pub owner: String,
    /// The date the pipeline became active.
    pub start_date: NaiveDate,
    /// Interval schedule; `None` means manual trigger only.
    pub schedule: Option<String>,
    /// Whether missed runs are backfilled.
    pub catchup: bool,
}

impl Default for PipelineSpec {
    fn default() -> Self {
        Self {
            id: "stadium_etl".to_string(),
            owner: "data-engineering".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 8, 1).expect("valid start date"),
            schedule: None,
            catchup: false,
        }
    }
}

/// Execution context shared by the stages of one run.
#[derive(Debug)]
pub struct StageContext {
    /// Pipeline configuration.
    pub config: EtlConfig,
    /// Inter-stage transfer store.
    pub store: TransferStore,
    /// Identity of this run.
    pub run: RunIdentity,
}

/// Trait for pipeline stages.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Returns the task id of the stage.
    fn name(&self) -> &str;

    /// Executes the stage against the shared run context.
    async fn execute(&self, ctx: &StageContext) -> Result<(), EtlError>;
}

/// Fetches the source page, extracts stadium rows, and pushes them.
pub struct ExtractStage {
    fetcher: Arc<dyn PageFetcher>,
}

impl ExtractStage {
    /// Creates the extraction stage with the given fetcher.
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Stage for ExtractStage {
    fn name(&self) -> &str {
        EXTRACT_TASK_ID
    }

    async fn execute(&self, ctx: &StageContext) -> Result<(), EtlError> {
        let html = self.fetcher.fetch(&ctx.config.source_url).await?;
        let rows = extract::extract_rows(&html)?;

        // An empty record set produces a useless output file; halt instead.
        if rows.is_empty() {
            return Err(ParseError::EmptyTable.into());
        }

        info!(rows = rows.len(), "extracted stadium rows");
        let payload = serde_json::to_string(&rows)?;
        ctx.store.push(EXTRACT_TASK_ID, ROWS_KEY, payload)?;
        Ok(())
    }
}

/// Pulls raw rows, transforms them, and pushes the final records.
#[derive(Debug, Default)]
pub struct TransformStage;

#[async_trait]
impl Stage for TransformStage {
    fn name(&self) -> &str {
        TRANSFORM_TASK_ID
    }

    async fn execute(&self, ctx: &StageContext) -> Result<(), EtlError> {
        let payload = ctx.store.pull(EXTRACT_TASK_ID, ROWS_KEY)?;
        let rows: Vec<RawStadiumRow> = serde_json::from_str(&payload)?;

        let records = transform::transform_rows(rows, &ctx.config)?;

        let payload = serde_json::to_string(&records)?;
        ctx.store.push(TRANSFORM_TASK_ID, ROWS_KEY, payload)?;
        Ok(())
    }
}

/// Pulls the final records and writes the timestamped CSV file.
#[derive(Debug, Default)]
pub struct WriteStage;

#[async_trait]
impl Stage for WriteStage {
    fn name(&self) -> &str {
        WRITE_TASK_ID
    }

    async fn execute(&self, ctx: &StageContext) -> Result<(), EtlError> {
        let payload = ctx.store.pull(TRANSFORM_TASK_ID, ROWS_KEY)?;
        let records: Vec<StadiumRecord> = serde_json::from_str(&payload)?;

        write::write_records(&records, &ctx.config.output_dir)?;
        Ok(())
    }
}

/// Runs the extract, transform, and write stages strictly in sequence.
pub struct EtlPipeline {
    spec: PipelineSpec,
    stages: Vec<Arc<dyn Stage>>,
}

impl EtlPipeline {
    /// Builds the standard three-stage pipeline with the given fetcher.
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_spec(PipelineSpec::default(), fetcher)
    }

    /// Builds the pipeline with explicit metadata.
    #[must_use]
    pub fn with_spec(spec: PipelineSpec, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            spec,
            stages: vec![
                Arc::new(ExtractStage::new(fetcher)),
                Arc::new(TransformStage),
                Arc::new(WriteStage),
            ],
        }
    }

    /// Returns the pipeline metadata.
    #[must_use]
    pub fn spec(&self) -> &PipelineSpec {
        &self.spec
    }

    /// Executes all stages in order, halting on the first error.
    pub async fn run(&self, config: EtlConfig) -> Result<RunIdentity, EtlError> {
        let run = RunIdentity::new();
        let ctx = StageContext {
            config,
            store: TransferStore::new(),
            run: run.clone(),
        };

        info!(
            pipeline = %self.spec.id,
            run_id = %run.run_id,
            "starting pipeline run"
        );

        for stage in &self.stages {
            info!(stage = stage.name(), "executing stage");
            if let Err(err) = stage.execute(&ctx).await {
                error!(stage = stage.name(), error = %err, "stage failed, aborting run");
                return Err(err);
            }
        }

        info!(run_id = %run.run_id, "pipeline run complete");
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;
    use pretty_assertions::assert_eq;

    /// Three stadium rows: one without an image, two sharing a location.
    const FIXTURE_HTML: &str = r#"<html><body>
        <table><caption>List of association football stadiums by capacity</caption>
        <tr><th>Stadium</th><th>Capacity</th><th>Region</th><th>Country</th>
            <th>City</th><th>Image</th><th>Home team</th></tr>
        <tr><td>Old Trafford&#9830;</td><td>74,310</td><td>Europe</td><td>England</td>
            <td>Manchester</td><td><img src="//upload.wikimedia.org/ot.jpg"></td>
            <td>Manchester United</td></tr>
        <tr><td>Etihad Stadium[1]</td><td>53.400</td><td>Europe</td><td>England</td>
            <td>Manchester</td><td></td><td>Manchester City</td></tr>
        <tr><td>Anfield</td><td>61,276</td><td>Europe</td><td>England</td>
            <td>Liverpool</td><td><img src="https://upload.wikimedia.org/anfield.jpg"></td>
            <td>Liverpool</td></tr>
        </table></body></html>"#;

    fn test_config(dir: &tempfile::TempDir) -> EtlConfig {
        EtlConfig::default().with_output_dir(dir.path())
    }

    fn written_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let mut entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        entries.remove(0)
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = EtlPipeline::new(Arc::new(StaticFetcher::ok(FIXTURE_HTML)));

        pipeline.run(test_config(&dir)).await.unwrap();

        let path = written_file(&dir);
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("stadium_cleaned "));
        assert!(name.ends_with(".csv"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        // Header plus all three data rows; duplicates are kept.
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "rank,stadium,capacity,region,country,city,image,home_team,location"
        );
        assert!(lines[1].starts_with("1,Old Trafford,74310,"));
        assert!(lines[1].contains("https://upload.wikimedia.org/ot.jpg"));
        assert!(lines[2].contains("No-image-available"));
        assert!(lines[2].contains("\"England, Manchester\""));
        assert!(lines[3].starts_with("3,Anfield,61276,"));
    }

    #[tokio::test]
    async fn test_pipeline_halts_on_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = EtlPipeline::new(Arc::new(StaticFetcher::failing()));

        let err = pipeline.run(test_config(&dir)).await.unwrap_err();
        assert!(matches!(err, EtlError::Fetch(_)));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_pipeline_halts_on_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = EtlPipeline::new(Arc::new(StaticFetcher::ok(
            "<html><body><p>no tables here</p></body></html>",
        )));

        let err = pipeline.run(test_config(&dir)).await.unwrap_err();
        assert!(matches!(err, EtlError::Parse(ParseError::NoTables)));
    }

    #[tokio::test]
    async fn test_pipeline_halts_on_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let html = "<html><body><table>\
                    <caption>football stadiums</caption>\
                    <tr><th>Stadium</th></tr>\
                    </table></body></html>";
        let pipeline = EtlPipeline::new(Arc::new(StaticFetcher::ok(html)));

        let err = pipeline.run(test_config(&dir)).await.unwrap_err();
        assert!(matches!(err, EtlError::Parse(ParseError::EmptyTable)));
    }

    #[test]
    fn test_default_spec_is_manual_only() {
        let spec = PipelineSpec::default();
        assert_eq!(spec.schedule, None);
        assert!(!spec.catchup);
        assert_eq!(spec.id, "stadium_etl");
    }
}
