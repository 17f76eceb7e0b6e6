//! Record model: rarity tiers, part types and input metadata rows.

use crate::result::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Field holding the rarity tier in every input row.
pub const RARITY_FIELD: &str = "Rarity";

/// Field holding the part type in every input row.
pub const PART_TYPE_FIELD: &str = "Genesis Type";

/// Rarity tier, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All tiers in ascending rarity.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Numeric encoding, 0 for `Common` through 4 for `Legendary`.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Rarity::ALL
            .into_iter()
            .find(|rarity| rarity.as_str() == s)
            .ok_or(())
    }
}

/// Body part carried by a record. The declaration order is the canonical lane order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartType {
    Head,
    Torso,
    Legs,
    Arms,
}

impl PartType {
    /// All part types in canonical lane order.
    pub const ALL: [PartType; 4] = [PartType::Head, PartType::Torso, PartType::Legs, PartType::Arms];

    /// Lane index, 0 for `Head` through 3 for `Arms`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`PartType::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        PartType::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartType::Head => "Head",
            PartType::Torso => "Torso",
            PartType::Legs => "Legs",
            PartType::Arms => "Arms",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PartType::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or(())
    }
}

/// One input row: its tier, its part type and every field in input order.
///
/// Serializes back to the flat input object so checkpoints look like the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    rarity: Rarity,
    part_type: PartType,
    fields: Map<String, Value>,
}

impl MetadataRecord {
    /// Build a record from a parsed row. `index` only feeds error messages.
    pub fn from_fields(index: usize, fields: Map<String, Value>) -> Result<Self> {
        let rarity = parse_field(index, &fields, RARITY_FIELD)?;
        let part_type = parse_field(index, &fields, PART_TYPE_FIELD)?;
        Ok(Self {
            rarity,
            part_type,
            fields,
        })
    }

    /// Parse a whole collection, failing on the first malformed row.
    pub fn parse_all(rows: Vec<Map<String, Value>>) -> Result<Vec<Self>> {
        if rows.is_empty() {
            return Err(Error::EmptyDataset);
        }
        rows.into_iter()
            .enumerate()
            .map(|(index, fields)| Self::from_fields(index, fields))
            .collect()
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn part_type(&self) -> PartType {
        self.part_type
    }

    /// Every input field, in input order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Serialize for MetadataRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}

fn parse_field<T: FromStr>(index: usize, fields: &Map<String, Value>, field: &'static str) -> Result<T> {
    let value = fields
        .get(field)
        .ok_or(Error::MissingField { index, field })?;
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::InvalidField {
            index,
            field,
            value: value.to_string(),
        })
}
