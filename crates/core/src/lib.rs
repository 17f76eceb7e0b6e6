//! Building blocks of the genesis reorder: the block layout bijections, the
//! block-hash seeded shuffle, and the record model they operate on.

pub mod layout;
pub mod record;
pub mod result;
pub mod seed;
pub mod shuffle;

pub use layout::{BlockLayout, LayoutConfig};
pub use record::{MetadataRecord, PartType, Rarity, PART_TYPE_FIELD, RARITY_FIELD};
pub use result::{Error, ErrorKind, Result};
pub use seed::BlockHash;
pub use shuffle::{scatter, shuffle, shuffled_indices, BlockHashSource, SwapSource};
