//! Module for the `run` subcommand, which reorders the genesis metadata and writes
//! the rarity plan, the intermediate orderings and the final token metadata.

use super::RunError;
use clap::Args;
use genesis_core::{BlockHash, MetadataRecord};
use genesis_pipeline::{reorder, ReorderArtifacts, ReorderConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON array of metadata rows, each with "Rarity" and "Genesis Type" fields.
    #[arg(long, default_value = "input/genesis-reference-metadata.json")]
    pub metadata: PathBuf,
    /// JSON object holding the public block "hash" used as shuffle seed.
    #[arg(long, default_value = "input/block-for-shuffle.json")]
    pub block: PathBuf,
    /// Directory receiving the intermediate checkpoints.
    #[arg(long, default_value = "tmp")]
    pub tmp_dir: PathBuf,
    /// Path of the final token metadata.
    #[arg(long, default_value = "result/final-data.json")]
    pub output: PathBuf,
    /// Optional JSON file overriding layout, templates or the numeric split.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Block the shuffle seed was taken from.
#[derive(Debug, Deserialize)]
struct BlockFile {
    hash: BlockHash,
    #[serde(default)]
    number: Option<u64>,
}

impl super::Command for RunArgs {
    fn execute(self) -> Result<(), RunError> {
        let RunArgs {
            metadata,
            block,
            tmp_dir,
            output,
            config,
        } = self;

        // Step 1: Load configuration and inputs
        let config = match config {
            Some(path) => {
                let raw = read(&path)?;
                serde_json::from_str(&raw).map_err(|source| RunError::Config { path, source })?
            }
            None => ReorderConfig::default(),
        };
        debug!("config: {:?}", config);

        let block: BlockFile = read_json(&block)?;
        match block.number {
            Some(number) => info!("seeding with block {} ({})", number, block.hash),
            None => info!("seeding with block hash {}", block.hash),
        }

        let rows: Vec<Map<String, Value>> = read_json(&metadata)?;
        let records = MetadataRecord::parse_all(rows)?;
        info!("loaded {} records from {}", records.len(), metadata.display());

        // Step 2: Run the pipeline; nothing is written unless every check passes
        let artifacts = reorder(records, &block.hash, &config)?;

        // Step 3: Persist checkpoints, final metadata last
        write_checkpoints(&artifacts, &tmp_dir)?;
        write_json(&output, &artifacts.final_metadata())?;
        info!(
            "wrote {} tokens to {}",
            artifacts.report.tokens,
            output.display()
        );
        info!("All done!");

        Ok(())
    }
}

/// Write the rarity plan, the intermediate order and the grouped buckets into `dir`.
fn write_checkpoints(artifacts: &ReorderArtifacts, dir: &Path) -> Result<(), RunError> {
    write_json(&dir.join("shuffled-rarities.json"), &artifacts.rarity_plan)?;
    write_json(
        &dir.join("numeric-shuffled-rarities.json"),
        &artifacts.numeric_plan,
    )?;
    write_json(&dir.join("intermediate-data.json"), &artifacts.intermediate)?;
    write_json(&dir.join("body-parts-by-rarity.json"), &artifacts.buckets)?;
    Ok(())
}

fn read(path: &Path) -> Result<String, RunError> {
    fs::read_to_string(path).map_err(|source| RunError::File {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RunError> {
    let raw = read(path)?;
    serde_json::from_str(&raw).map_err(|source| RunError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print `value` to `path`, creating parent directories and syncing to disk.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RunError> {
    let file_error = |source: std::io::Error| RunError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_error)?;
    }
    let payload = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path).map_err(file_error)?;
    file.write_all(payload.as_bytes()).map_err(file_error)?;
    file.sync_all().map_err(file_error)?;
    debug!("wrote {}", path.display());
    Ok(())
}
