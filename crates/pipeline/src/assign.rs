//! Token-id assignment.

use crate::format::{FormatConfig, TokenMetadata};
use genesis_core::{BlockLayout, Error, MetadataRecord, Result};
use std::collections::HashMap;
use tracing::{debug, info};

/// Maps a 1-based sequence position to its token id.
pub trait TokenIdMap {
    fn token_id(&self, position: u64) -> Result<u64>;
}

impl TokenIdMap for BlockLayout {
    fn token_id(&self, position: u64) -> Result<u64> {
        self.convert(position)
    }
}

/// A record placed at its final sequence position and bound to its token id.
#[derive(Debug, Clone)]
pub struct FinalRecord {
    /// 1-based position in the interleaved sequence
    pub position: u64,
    /// Permanent token id, `convert(position)`
    pub token_id: u64,
    pub record: MetadataRecord,
    /// Published metadata, stamped with `token_id`
    pub metadata: TokenMetadata,
}

/// Assign `map.token_id(p)` to the record at 1-based position `p`, then sort by token id.
///
/// Any collision or any gap in `1..=N` aborts the assignment.
pub fn assign_token_ids<M>(
    ordered: Vec<MetadataRecord>,
    map: &M,
    format: &FormatConfig,
) -> Result<Vec<FinalRecord>>
where
    M: TokenIdMap + ?Sized,
{
    let total = ordered.len() as u64;
    let mut claimed: HashMap<u64, u64> = HashMap::with_capacity(ordered.len());
    let mut assigned = Vec::with_capacity(ordered.len());

    for (position, record) in (1u64..).zip(ordered) {
        let token_id = map.token_id(position)?;
        if let Some(&previous) = claimed.get(&token_id) {
            return Err(Error::Collision {
                token_id,
                position,
                previous,
            });
        }
        claimed.insert(token_id, position);

        let mut metadata = TokenMetadata::render(&record, format);
        metadata.stamp(token_id);
        assigned.push(FinalRecord {
            position,
            token_id,
            record,
            metadata,
        });
    }

    assigned.sort_by_key(|r| r.token_id);

    if let Some(missing) = (1..=total).zip(&assigned).find_map(|(expected, r)| {
        (r.token_id != expected).then_some(expected)
    }) {
        return Err(Error::TokenRangeGap { total, missing });
    }

    debug!(
        "first tokens: {:?}",
        assigned.iter().take(4).map(|r| (r.token_id, r.position)).collect::<Vec<_>>()
    );
    info!("assigned {} token ids", total);
    Ok(assigned)
}
