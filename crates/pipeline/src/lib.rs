//! The genesis reorder pipeline.
//!
//! Stages, in order:
//! 1. [`distribution`] counts the input and checks it fills whole, balanced blocks.
//! 2. [`planner`] shuffles one rarity label per block.
//! 3. [`interleave`] shuffles the whole collection, groups it per (tier, part type)
//!    and lays each block out as one run per part type.
//! 4. [`assign`] binds each position to its token id and renders the metadata.
//! 5. [`validate`] re-derives the distribution and every part type from the output.
//!
//! Every shuffle is driven by the same block hash, so [`reorder`] is a pure
//! function of its inputs.

pub mod assign;
pub mod distribution;
pub mod format;
pub mod interleave;
pub mod planner;
pub mod validate;

pub use assign::{assign_token_ids, FinalRecord, TokenIdMap};
pub use distribution::Distribution;
pub use format::{Attribute, FormatConfig, TokenMetadata};
pub use interleave::{intermediate_order, redistribute, PartBuckets};
pub use planner::RarityPlan;
pub use validate::{validate, ValidationReport};

use genesis_core::{BlockHash, BlockHashSource, BlockLayout, LayoutConfig, MetadataRecord, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration for the reorder pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Block layout constants
    pub layout: LayoutConfig,
    /// Metadata templates
    pub format: FormatConfig,
    /// Length of the first group of the numeric rarity plan
    pub numeric_split: usize,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            format: FormatConfig::default(),
            numeric_split: 77,
        }
    }
}

/// Every checkpoint of one run, in production order.
#[derive(Debug, Clone)]
pub struct ReorderArtifacts {
    /// Input counts
    pub distribution: Distribution,
    /// Tier of every output block
    pub rarity_plan: RarityPlan,
    /// The plan as tier indices, split at `numeric_split`
    pub numeric_plan: [Vec<u8>; 2],
    /// Whole collection after the block-hash redistribution
    pub intermediate: Vec<MetadataRecord>,
    /// `intermediate` grouped per (tier, part type)
    pub buckets: PartBuckets,
    /// Token-id sorted output
    pub records: Vec<FinalRecord>,
    /// Checks passed by `records`
    pub report: ValidationReport,
}

impl ReorderArtifacts {
    /// The published metadata, sorted by token id.
    pub fn final_metadata(&self) -> Vec<&TokenMetadata> {
        self.records.iter().map(|r| &r.metadata).collect()
    }
}

/// Run the whole pipeline. Nothing is returned unless every check passed.
pub fn reorder(
    records: Vec<MetadataRecord>,
    hash: &BlockHash,
    config: &ReorderConfig,
) -> Result<ReorderArtifacts> {
    let layout = BlockLayout::new(config.layout)?;
    let source = BlockHashSource::new(hash);
    info!(
        "reordering {} records with block hash {} (block size {})",
        records.len(),
        hash,
        layout.range_size()
    );

    let distribution = Distribution::from_records(&records);
    distribution.check_layout(&layout)?;

    let rarity_plan = RarityPlan::build(&distribution, &layout, &source)?;
    let numeric_plan = rarity_plan.numeric_groups(config.numeric_split);

    let intermediate = intermediate_order(records, &source)?;
    let buckets = PartBuckets::group(intermediate.iter().cloned());
    let ordered = buckets.clone().interleave(&rarity_plan, &layout)?;

    let records = assign_token_ids(ordered, &layout, &config.format)?;
    let report = validate(&records, &distribution, &layout)?;

    Ok(ReorderArtifacts {
        distribution,
        rarity_plan,
        numeric_plan,
        intermediate,
        buckets,
        records,
        report,
    })
}
