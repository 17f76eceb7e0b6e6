//! Part interleaver.
//!
//! Records are first redistributed by a shuffle over the whole collection, then
//! grouped per (tier, part type) keeping that order. Each planned block drains
//! one lane-width run from every part type of its tier, in canonical part order.

use crate::planner::RarityPlan;
use genesis_core::{
    scatter, shuffled_indices, BlockLayout, Error, MetadataRecord, PartType, Rarity, Result,
    SwapSource,
};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Redistribute the collection: record `i` moves to `shuffled_indices(n)[i]`.
pub fn intermediate_order<S>(
    records: Vec<MetadataRecord>,
    source: &S,
) -> Result<Vec<MetadataRecord>>
where
    S: SwapSource + ?Sized,
{
    let permutation = shuffled_indices(records.len(), source);
    redistribute(records, &permutation)
}

/// Move record `i` to position `permutation[i]`.
pub fn redistribute(
    records: Vec<MetadataRecord>,
    permutation: &[usize],
) -> Result<Vec<MetadataRecord>> {
    let (count, indices) = (records.len(), permutation.len());
    scatter(records, permutation).ok_or(Error::NotAPermutation {
        records: count,
        indices,
    })
}

/// Records grouped by tier then part type, each bucket drained from the front.
#[derive(Debug, Clone, Default)]
pub struct PartBuckets {
    buckets: [[VecDeque<MetadataRecord>; 4]; 5],
}

impl PartBuckets {
    /// Group records, preserving their relative order inside each bucket.
    pub fn group(records: impl IntoIterator<Item = MetadataRecord>) -> Self {
        let mut buckets = Self::default();
        for record in records {
            buckets.bucket_mut(record.rarity(), record.part_type()).push_back(record);
        }
        buckets
    }

    pub fn bucket(&self, rarity: Rarity, part_type: PartType) -> &VecDeque<MetadataRecord> {
        &self.buckets[rarity.index() as usize][part_type.index()]
    }

    fn bucket_mut(&mut self, rarity: Rarity, part_type: PartType) -> &mut VecDeque<MetadataRecord> {
        &mut self.buckets[rarity.index() as usize][part_type.index()]
    }

    /// Records left across all buckets.
    pub fn remaining(&self) -> usize {
        self.buckets.iter().flatten().map(VecDeque::len).sum()
    }

    /// Emit the pre-assignment order: for every planned block, one lane-width run
    /// per part type in canonical order. Every record must be placed.
    pub fn interleave(
        mut self,
        plan: &RarityPlan,
        layout: &BlockLayout,
    ) -> Result<Vec<MetadataRecord>> {
        let lane_width = layout.lane_width() as usize;
        let mut ordered = Vec::with_capacity(self.remaining());
        let mut taken = [[0usize; 4]; 5];

        for (block, &rarity) in plan.blocks().iter().enumerate() {
            for part_type in PartType::ALL {
                let bucket = self.bucket_mut(rarity, part_type);
                let drained = &mut taken[rarity.index() as usize][part_type.index()];
                for _ in 0..lane_width {
                    let record = bucket.pop_front().ok_or(Error::BucketExhausted {
                        rarity,
                        part_type,
                        taken: *drained,
                    })?;
                    *drained += 1;
                    ordered.push(record);
                }
            }
            debug!("block {} filled from {}", block, rarity);
        }

        let count = self.remaining();
        if count != 0 {
            return Err(Error::UnplacedRecords { count });
        }
        info!("interleaved {} records over {} blocks", ordered.len(), plan.len());
        Ok(ordered)
    }
}

/// Serializes as `{ tier: { part: [records] } }` in canonical order.
impl Serialize for PartBuckets {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        struct Tier<'a>(&'a [VecDeque<MetadataRecord>; 4]);

        impl Serialize for Tier<'_> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut map = serializer.serialize_map(None)?;
                for part_type in PartType::ALL {
                    let bucket = &self.0[part_type.index()];
                    if !bucket.is_empty() {
                        map.serialize_entry(part_type.as_str(), bucket)?;
                    }
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(None)?;
        for rarity in Rarity::ALL {
            let tier = &self.buckets[rarity.index() as usize];
            if tier.iter().any(|bucket| !bucket.is_empty()) {
                map.serialize_entry(rarity.as_str(), &Tier(tier))?;
            }
        }
        map.end()
    }
}
