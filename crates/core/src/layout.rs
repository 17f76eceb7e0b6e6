//! Block layout bijections.
//!
//! Positions and token ids are 1-based and grouped into consecutive blocks of
//! `range_size`. Both transforms act on the offset inside a block and leave the
//! block itself untouched, so `f(x + k * range_size) == f(x) + k * range_size`.
//!
//! * The affine pair ([`BlockLayout::convert`] / [`BlockLayout::revert`]) maps a
//!   local offset `x` to `((x - 1) * factor + addend) mod range_size + 1`.
//! * The lane pair ([`BlockLayout::transform`] / [`BlockLayout::reverse_transform`])
//!   deals a block into `cycle_length` lanes of `range_size / cycle_length` slots,
//!   so each run of lane-width consecutive outputs comes from one lane.

use crate::record::PartType;
use crate::result::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest accepted block size. Keeps the inverse search short and every
/// intermediate product inside `u64`.
pub const MAX_RANGE_SIZE: u64 = 1 << 20;

/// Layout constants. Defaults are the values the genesis collection was minted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Block size
    pub range_size: u64,
    /// Multiplier of the affine transform, must be coprime with `range_size`
    pub factor: u64,
    /// Offset of the affine transform
    pub addend: u64,
    /// Number of lanes per block, one per part type
    pub cycle_length: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            range_size: 40,
            factor: 7,
            addend: 19,
            cycle_length: 4,
        }
    }
}

/// Validated layout with `factor` and `addend` reduced modulo `range_size` and
/// the modular inverse of `factor` cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    config: LayoutConfig,
    factor_inverse: u64,
    lane_width: u64,
}

impl BlockLayout {
    /// Validate the constants, reduce them modulo `range_size` and precompute the
    /// inverse of `factor`.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        let LayoutConfig {
            range_size,
            factor,
            addend,
            cycle_length,
        } = config;

        if range_size == 0 {
            return Err(Error::InvalidLayout("range_size must be positive".into()));
        }
        if range_size > MAX_RANGE_SIZE {
            return Err(Error::InvalidLayout(format!(
                "range_size {range_size} exceeds {MAX_RANGE_SIZE}"
            )));
        }
        if cycle_length == 0 || range_size % cycle_length != 0 {
            return Err(Error::InvalidLayout(format!(
                "cycle_length {cycle_length} must divide range_size {range_size}"
            )));
        }
        if cycle_length != PartType::ALL.len() as u64 {
            return Err(Error::InvalidLayout(format!(
                "cycle_length {cycle_length} must equal the {} part types",
                PartType::ALL.len()
            )));
        }
        if gcd(factor, range_size) != 1 {
            return Err(Error::InvalidLayout(format!(
                "factor {factor} is not coprime with range_size {range_size}"
            )));
        }

        let config = LayoutConfig {
            factor: factor % range_size,
            addend: addend % range_size,
            ..config
        };

        // range_size is bounded, a linear search is enough
        let factor_inverse = (1..=range_size)
            .find(|i| config.factor * i % range_size == 1 % range_size)
            .ok_or_else(|| {
                Error::InvalidLayout(format!("factor {factor} has no inverse mod {range_size}"))
            })?;

        Ok(Self {
            config,
            factor_inverse,
            lane_width: range_size / cycle_length,
        })
    }

    /// The constants in reduced form.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn range_size(&self) -> u64 {
        self.config.range_size
    }

    pub fn cycle_length(&self) -> u64 {
        self.config.cycle_length
    }

    /// Slots per lane inside a block.
    pub fn lane_width(&self) -> u64 {
        self.lane_width
    }

    /// Inverse of `factor` modulo `range_size`.
    pub fn factor_inverse(&self) -> u64 {
        self.factor_inverse
    }

    /// Affine transform: sequence position to token id.
    pub fn convert(&self, x: u64) -> Result<u64> {
        let (base, local) = self.split(x)?;
        let LayoutConfig {
            range_size,
            factor,
            addend,
            ..
        } = self.config;
        rebase(x, base, ((local - 1) * factor + addend) % range_size + 1)
    }

    /// Inverse of [`BlockLayout::convert`]: token id to sequence position.
    pub fn revert(&self, y: u64) -> Result<u64> {
        let (base, local) = self.split(y)?;
        let range_size = self.config.range_size;
        let shifted = (local - 1 + range_size - self.config.addend) % range_size;
        rebase(y, base, shifted * self.factor_inverse % range_size + 1)
    }

    /// Part type revealed by a token id: the lane its pre-image position sat in.
    pub fn part_type(&self, token_id: u64) -> Result<PartType> {
        let position = self.revert(token_id)?;
        let lane = ((position - 1) % self.config.range_size) / self.lane_width;
        PartType::from_index(lane as usize).ok_or_else(|| {
            Error::InvalidLayout(format!("lane {lane} has no part type"))
        })
    }

    /// Lane transform: deal consecutive positions round-robin across the lanes.
    pub fn transform(&self, x: u64) -> Result<u64> {
        let (base, local) = self.split(x)?;
        let cycle = self.config.cycle_length;
        let lane = (local - 1) % cycle;
        let slot = (local - 1) / cycle;
        rebase(x, base, lane * self.lane_width + slot + 1)
    }

    /// Inverse of [`BlockLayout::transform`].
    pub fn reverse_transform(&self, y: u64) -> Result<u64> {
        let (base, local) = self.split(y)?;
        let lane = (local - 1) / self.lane_width;
        let slot = (local - 1) % self.lane_width;
        rebase(y, base, slot * self.config.cycle_length + lane + 1)
    }

    /// Split a 1-based value into its block base and its 1-based offset inside the block.
    fn split(&self, x: u64) -> Result<(u64, u64)> {
        if x == 0 {
            return Err(Error::PositionOutOfRange(x));
        }
        let range_size = self.config.range_size;
        let base = (x - 1) / range_size * range_size;
        Ok((base, x - base))
    }
}

/// `base + local`; `input` is reported when the last partial block before
/// `u64::MAX` would run past it.
fn rebase(input: u64, base: u64, local: u64) -> Result<u64> {
    base.checked_add(local).ok_or(Error::PositionOutOfRange(input))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
