//! Per-tier and per-(tier, part type) record counts.

use genesis_core::{BlockLayout, Error, MetadataRecord, PartType, Rarity, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Record counts indexed by tier and part type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    counts: [[usize; 4]; 5],
}

impl Distribution {
    /// Count any sequence of (tier, part type) pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Rarity, PartType)>) -> Self {
        let mut distribution = Self::default();
        for (rarity, part_type) in pairs {
            distribution.counts[rarity.index() as usize][part_type.index()] += 1;
        }
        distribution
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a MetadataRecord>) -> Self {
        Self::from_pairs(records.into_iter().map(|r| (r.rarity(), r.part_type())))
    }

    pub fn count(&self, rarity: Rarity, part_type: PartType) -> usize {
        self.counts[rarity.index() as usize][part_type.index()]
    }

    /// Records in a tier, all part types together.
    pub fn tier_count(&self, rarity: Rarity) -> usize {
        self.counts[rarity.index() as usize].iter().sum()
    }

    pub fn total(&self) -> usize {
        Rarity::ALL.iter().map(|&r| self.tier_count(r)).sum()
    }

    /// Number of whole blocks a tier fills.
    pub fn blocks(&self, rarity: Rarity, layout: &BlockLayout) -> Result<usize> {
        let count = self.tier_count(rarity);
        let range_size = layout.range_size();
        if count as u64 % range_size != 0 {
            return Err(Error::MisalignedTier {
                rarity,
                count,
                range_size,
            });
        }
        Ok((count as u64 / range_size) as usize)
    }

    /// Check that every tier fills whole blocks and splits evenly across part types.
    ///
    /// This is what guarantees each block can take one lane-width run of every part type.
    pub fn check_layout(&self, layout: &BlockLayout) -> Result<()> {
        if self.total() == 0 {
            return Err(Error::EmptyDataset);
        }
        for rarity in Rarity::ALL {
            self.blocks(rarity, layout)?;
            let expected = self.tier_count(rarity) / PartType::ALL.len();
            for part_type in PartType::ALL {
                let found = self.count(rarity, part_type);
                if found != expected {
                    return Err(Error::PartCountMismatch {
                        rarity,
                        part_type,
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    /// The balanced distribution implied by the tier totals: a quarter of each tier per part type.
    pub fn balanced(&self) -> Self {
        let mut balanced = Self::default();
        for rarity in Rarity::ALL {
            let share = self.tier_count(rarity) / PartType::ALL.len();
            balanced.counts[rarity.index() as usize] = [share; 4];
        }
        balanced
    }

    /// First (tier, part type) pair whose count differs from `expected`.
    pub fn diff(&self, expected: &Distribution) -> Option<(Rarity, PartType, usize, usize)> {
        Rarity::ALL
            .into_iter()
            .flat_map(|r| PartType::ALL.into_iter().map(move |p| (r, p)))
            .find_map(|(r, p)| {
                let (want, have) = (expected.count(r, p), self.count(r, p));
                (want != have).then_some((r, p, want, have))
            })
    }
}

impl Serialize for Distribution {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        struct Parts<'a>(&'a [usize; 4]);

        impl Serialize for Parts<'_> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut map = serializer.serialize_map(Some(4))?;
                for part_type in PartType::ALL {
                    map.serialize_entry(part_type.as_str(), &self.0[part_type.index()])?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(5))?;
        for rarity in Rarity::ALL {
            map.serialize_entry(rarity.as_str(), &Parts(&self.counts[rarity.index() as usize]))?;
        }
        map.end()
    }
}
