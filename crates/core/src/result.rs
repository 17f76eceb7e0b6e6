//! Core results and error types

use crate::record::{PartType, Rarity};
use thiserror::Error;

/// Broad class of a failure, used by the binary to pick an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dataset or an intermediate result breaks a structural invariant.
    Invariant,
    /// Two sequence positions were mapped to the same token id.
    Collision,
    /// The input records or the block hash are malformed.
    Upstream,
}

/// Core error type encompassing all core and pipeline errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A per-(tier, part type) bucket ran dry while interleaving.
    #[error("bucket {rarity}/{part_type} exhausted after {taken} records")]
    BucketExhausted {
        /// Tier of the exhausted bucket.
        rarity: Rarity,
        /// Part type of the exhausted bucket.
        part_type: PartType,
        /// Number of records already drained from it.
        taken: usize,
    },

    /// Two sequence positions produced the same token id.
    #[error("token id {token_id} assigned to position {position} collides with position {previous}")]
    Collision {
        /// The duplicated token id.
        token_id: u64,
        /// The position that produced the duplicate.
        position: u64,
        /// The position that first claimed the token id.
        previous: u64,
    },

    /// The final (tier, part type) frequencies differ from the input distribution.
    #[error("distribution mismatch for {rarity}/{part_type}: expected {expected}, found {found}")]
    DistributionMismatch {
        /// Tier of the mismatching pair.
        rarity: Rarity,
        /// Part type of the mismatching pair.
        part_type: PartType,
        /// Count derived from the input distribution.
        expected: usize,
        /// Count observed in the final output.
        found: usize,
    },

    /// The input collection holds no records.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Failed to decode hex string.
    #[error("hex decode failed: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Block hash is not a 0x-prefixed 32-byte hex string.
    #[error("invalid block hash: {0}")]
    InvalidBlockHash(String),

    /// A record field holds a value outside its domain.
    #[error("record {index}: field '{field}' has unsupported value {value}")]
    InvalidField {
        /// Index of the record in the input collection.
        index: usize,
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value, rendered as JSON.
        value: String,
    },

    /// The layout constants cannot form a bijection.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A tier count is not a whole number of blocks.
    #[error("{rarity} has {count} records, not a multiple of the block size {range_size}")]
    MisalignedTier {
        /// The misaligned tier.
        rarity: Rarity,
        /// Number of records in the tier.
        count: usize,
        /// Block size.
        range_size: u64,
    },

    /// A record lacks a mandatory field.
    #[error("record {index}: missing field '{field}'")]
    MissingField {
        /// Index of the record in the input collection.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// An index array is not a permutation of the records it should reorder.
    #[error("index array of {indices} entries is not a permutation of {records} records")]
    NotAPermutation {
        /// Number of records to redistribute.
        records: usize,
        /// Length of the index array.
        indices: usize,
    },

    /// A tier does not hold the same number of records of every part type.
    #[error("{rarity} holds {found} {part_type} records, expected {expected}")]
    PartCountMismatch {
        /// The unbalanced tier.
        rarity: Rarity,
        /// The part type with the wrong count.
        part_type: PartType,
        /// Expected count (tier count divided by the lane count).
        expected: usize,
        /// Observed count.
        found: usize,
    },

    /// The token id does not reveal the part type stored in the record.
    #[error("token {token_id} decodes to {decoded} but the record is {stored}")]
    PartTypeMismatch {
        /// The offending token id.
        token_id: u64,
        /// Part type recovered from the token id alone.
        decoded: PartType,
        /// Part type stored in the record attributes.
        stored: PartType,
    },

    /// The shuffled plan does not hold the expected number of blocks for a tier.
    #[error("rarity plan holds {found} {rarity} blocks, expected {expected}")]
    PlanCountMismatch {
        /// The tier with the wrong block count.
        rarity: Rarity,
        /// Block count derived from the distribution.
        expected: usize,
        /// Block count observed in the plan.
        found: usize,
    },

    /// Positions and token ids are 1-based and must fit their block in `u64`.
    #[error("position {0} is outside the supported domain")]
    PositionOutOfRange(u64),

    /// The assigned token ids do not cover `1..=N` exactly.
    #[error("token ids do not cover 1..={total}: first gap at {missing}")]
    TokenRangeGap {
        /// Number of records.
        total: u64,
        /// Smallest id in range with no record.
        missing: u64,
    },

    /// The rarity plan left records in their buckets.
    #[error("{count} records were not placed by the rarity plan")]
    UnplacedRecords {
        /// Records left across all buckets.
        count: usize,
    },
}

impl Error {
    /// Classify the error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Collision { .. } => ErrorKind::Collision,
            Error::EmptyDataset
            | Error::HexDecode(_)
            | Error::InvalidBlockHash(_)
            | Error::InvalidField { .. }
            | Error::MissingField { .. } => ErrorKind::Upstream,
            Error::BucketExhausted { .. }
            | Error::DistributionMismatch { .. }
            | Error::InvalidLayout(_)
            | Error::MisalignedTier { .. }
            | Error::NotAPermutation { .. }
            | Error::PartCountMismatch { .. }
            | Error::PartTypeMismatch { .. }
            | Error::PlanCountMismatch { .. }
            | Error::PositionOutOfRange(_)
            | Error::TokenRangeGap { .. }
            | Error::UnplacedRecords { .. } => ErrorKind::Invariant,
        }
    }
}

/// Core result type
pub type Result<T> = std::result::Result<T, Error>;
