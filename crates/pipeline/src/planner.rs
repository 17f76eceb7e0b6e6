//! Distribution planner: one rarity label per output block, shuffled by the block hash.

use crate::distribution::Distribution;
use genesis_core::{shuffle, BlockLayout, Error, Rarity, Result, SwapSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Tier of every output block, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RarityPlan {
    blocks: Vec<Rarity>,
}

impl RarityPlan {
    /// Build the unshuffled plan (tiers in ascending rarity), shuffle it and
    /// re-check the block count of every tier.
    pub fn build<S>(distribution: &Distribution, layout: &BlockLayout, source: &S) -> Result<Self>
    where
        S: SwapSource + ?Sized,
    {
        let mut blocks = Vec::new();
        for rarity in Rarity::ALL {
            let count = distribution.blocks(rarity, layout)?;
            debug!("{} fills {} blocks", rarity, count);
            blocks.extend(std::iter::repeat(rarity).take(count));
        }

        shuffle(&mut blocks, source);
        let plan = Self { blocks };

        for rarity in Rarity::ALL {
            let expected = distribution.blocks(rarity, layout)?;
            let found = plan.count(rarity);
            if found != expected {
                return Err(Error::PlanCountMismatch {
                    rarity,
                    expected,
                    found,
                });
            }
        }

        info!("rarity plan holds {} blocks", plan.len());
        Ok(plan)
    }

    pub fn blocks(&self) -> &[Rarity] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks assigned to `rarity`.
    pub fn count(&self, rarity: Rarity) -> usize {
        self.blocks.iter().filter(|&&r| r == rarity).count()
    }

    /// Tier indices (0..=4), split into a head of `split_at` blocks and the remainder.
    ///
    /// `split_at` is clamped to the plan length, so the tail may be empty.
    pub fn numeric_groups(&self, split_at: usize) -> [Vec<u8>; 2] {
        let indices: Vec<u8> = self.blocks.iter().map(|r| r.index()).collect();
        let split_at = split_at.min(indices.len());
        [indices[..split_at].to_vec(), indices[split_at..].to_vec()]
    }
}
