//! Token metadata formatting.

use genesis_core::{MetadataRecord, PartType, Rarity, PART_TYPE_FIELD, RARITY_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text and URL templates of the published metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Collection name placed before the token number
    pub name_prefix: String,
    /// Base URL of the part images, without trailing slash
    pub image_base_url: String,
    /// Description text, `{rarity}` is replaced by the tier name
    pub description_template: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            name_prefix: "BYTE CITY Genesis".into(),
            image_base_url: "https://assets-bytecity.s3.amazonaws.com/png".into(),
            description_template: "A Genesis part with {rarity} rarity. Four complementary parts \
                (Head, Torso, Arms and Legs) of the same rarity can be fused to generate an \
                Oracle of that rarity."
                .into(),
        }
    }
}

/// One `{ trait_type, value }` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: Value,
}

/// Published metadata of one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub image: String,
    pub description: String,
    pub attributes: Vec<Attribute>,
    #[serde(rename = "tokenId", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<u64>,
}

impl TokenMetadata {
    /// Render a record. The name carries a bare `#` until [`TokenMetadata::stamp`] is called.
    pub fn render(record: &MetadataRecord, config: &FormatConfig) -> Self {
        let rarity = record.rarity();
        let part_type = record.part_type();
        Self {
            name: format!("{} # {} {}", config.name_prefix, rarity, part_type),
            image: format!(
                "{}/genesis_{}_{}.png",
                config.image_base_url,
                part_type.as_str().to_lowercase(),
                rarity.as_str().to_lowercase()
            ),
            description: config
                .description_template
                .replace("{rarity}", rarity.as_str()),
            attributes: record
                .fields()
                .iter()
                .map(|(trait_type, value)| Attribute {
                    trait_type: trait_type.clone(),
                    value: value.clone(),
                })
                .collect(),
            token_id: None,
        }
    }

    /// Record the token id and embed it after the first `#` of the name.
    pub fn stamp(&mut self, token_id: u64) {
        self.name = self.name.replacen('#', &format!("#{token_id}"), 1);
        self.token_id = Some(token_id);
    }

    /// Value of the attribute named `trait_type`.
    pub fn attribute(&self, trait_type: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| &a.value)
    }

    /// Tier as published in the attributes.
    pub fn rarity(&self) -> Option<Rarity> {
        self.attribute(RARITY_FIELD)?.as_str()?.parse().ok()
    }

    /// Part type as published in the attributes.
    pub fn part_type(&self) -> Option<PartType> {
        self.attribute(PART_TYPE_FIELD)?.as_str()?.parse().ok()
    }
}
