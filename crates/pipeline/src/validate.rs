//! Post-assignment checks on the published metadata.
//!
//! Both checks read tier and part type back from the rendered attributes, so
//! they hold for the artifact itself rather than for the in-memory records.

use crate::assign::FinalRecord;
use crate::distribution::Distribution;
use genesis_core::{BlockLayout, Error, Result, PART_TYPE_FIELD, RARITY_FIELD};
use serde::Serialize;
use tracing::info;

/// Outcome of a successful validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Tokens checked
    pub tokens: usize,
    /// (tier, part type) counts observed in the output
    pub distribution: Distribution,
}

/// Recount the output against the balanced split of `input`, then check that every
/// token id alone decodes to the part type its metadata publishes.
pub fn validate(
    records: &[FinalRecord],
    input: &Distribution,
    layout: &BlockLayout,
) -> Result<ValidationReport> {
    let mut pairs = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let metadata = &record.metadata;
        let rarity = metadata.rarity().ok_or(Error::MissingField {
            index,
            field: RARITY_FIELD,
        })?;
        let part_type = metadata.part_type().ok_or(Error::MissingField {
            index,
            field: PART_TYPE_FIELD,
        })?;
        pairs.push((rarity, part_type));
    }

    let observed = Distribution::from_pairs(pairs.iter().copied());
    if let Some((rarity, part_type, expected, found)) = observed.diff(&input.balanced()) {
        return Err(Error::DistributionMismatch {
            rarity,
            part_type,
            expected,
            found,
        });
    }

    for (record, &(_, stored)) in records.iter().zip(&pairs) {
        let decoded = layout.part_type(record.token_id)?;
        if decoded != stored {
            return Err(Error::PartTypeMismatch {
                token_id: record.token_id,
                decoded,
                stored,
            });
        }
    }

    info!("validated {} tokens", records.len());
    Ok(ValidationReport {
        tokens: records.len(),
        distribution: observed,
    })
}
