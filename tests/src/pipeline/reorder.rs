use genesis_core::{BlockHash, BlockLayout, Error, ErrorKind, LayoutConfig, PartType, Rarity};
use genesis_pipeline::{reorder, ReorderConfig};
use genesis_tests::{records, GENESIS_TIERS, SEED};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_test_writer()
        .try_init();
}

fn id(value: &serde_json::Value) -> u64 {
    value.as_u64().unwrap()
}

#[test]
fn test_genesis_distribution() {
    init_tracing();
    let hash = BlockHash::from_hex(SEED).unwrap();
    let artifacts = reorder(records(&GENESIS_TIERS), &hash, &ReorderConfig::default()).unwrap();

    // one block per 40 records of each tier
    assert_eq!(artifacts.rarity_plan.len(), 122);
    for (rarity, count) in GENESIS_TIERS {
        assert_eq!(artifacts.rarity_plan.count(rarity), count / 40);
        for part_type in PartType::ALL {
            assert_eq!(artifacts.report.distribution.count(rarity, part_type), count / 4);
        }
    }

    let [head, tail] = &artifacts.numeric_plan;
    assert_eq!(head.len(), 77);
    assert_eq!(tail.len(), 45);
    assert_eq!(&head[..12], [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 3, 1]);
}

#[test]
fn test_token_ids_are_exact_range() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let artifacts = reorder(records(&GENESIS_TIERS), &hash, &ReorderConfig::default()).unwrap();
    let ids: Vec<u64> = artifacts.records.iter().map(|r| r.token_id).collect();
    assert_eq!(ids, (1..=4880).collect::<Vec<u64>>());
}

#[test]
fn test_token_id_reveals_part_type() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let layout = BlockLayout::new(LayoutConfig::default()).unwrap();
    let artifacts = reorder(records(&GENESIS_TIERS), &hash, &ReorderConfig::default()).unwrap();
    for record in &artifacts.records {
        assert_eq!(layout.part_type(record.token_id).unwrap(), record.record.part_type());
        assert_eq!(record.metadata.part_type(), Some(record.record.part_type()));
    }
}

#[test]
fn test_blocks_share_tier() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let artifacts = reorder(records(&GENESIS_TIERS), &hash, &ReorderConfig::default()).unwrap();
    for block in artifacts.records.chunks(40) {
        let rarity = block[0].record.rarity();
        assert!(block.iter().all(|r| r.record.rarity() == rarity));
    }
}

#[test]
fn test_known_final_order() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let artifacts = reorder(records(&GENESIS_TIERS), &hash, &ReorderConfig::default()).unwrap();
    let metadata = artifacts.final_metadata();

    let first: Vec<(u64, &str, &str)> = metadata[..3]
        .iter()
        .map(|m| {
            (
                id(m.attribute("Id").unwrap()),
                m.attribute("Rarity").unwrap().as_str().unwrap(),
                m.attribute("Genesis Type").unwrap().as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        first,
        [
            (1904, "Common", "Head"),
            (2118, "Common", "Legs"),
            (656, "Common", "Head")
        ]
    );
    assert_eq!(metadata[0].name, "BYTE CITY Genesis #1 Common Head");
    assert_eq!(metadata[0].token_id, Some(1));
    assert_eq!(id(metadata[4879].attribute("Id").unwrap()), 3862);
}

#[test]
fn test_rerun_is_byte_identical() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let config = ReorderConfig::default();
    let first = reorder(records(&GENESIS_TIERS), &hash, &config).unwrap();
    let second = reorder(records(&GENESIS_TIERS), &hash, &config).unwrap();
    assert_eq!(
        serde_json::to_string(&first.final_metadata()).unwrap(),
        serde_json::to_string(&second.final_metadata()).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.buckets).unwrap(),
        serde_json::to_string(&second.buckets).unwrap()
    );
}

#[test]
fn test_intermediate_is_permutation_of_input() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let artifacts = reorder(records(&GENESIS_TIERS), &hash, &ReorderConfig::default()).unwrap();
    let mut ids: Vec<u64> = artifacts
        .intermediate
        .iter()
        .map(|r| id(&r.fields()["Id"]))
        .collect();
    assert_ne!(ids, (0..4880).collect::<Vec<u64>>());
    ids.sort_unstable();
    assert_eq!(ids, (0..4880).collect::<Vec<u64>>());
}

#[test]
fn test_misaligned_tier_is_rejected() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let tiers = [(Rarity::Common, 3080), (Rarity::Rare, 444)];
    let err = reorder(records(&tiers), &hash, &ReorderConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::MisalignedTier {
            rarity: Rarity::Rare,
            count: 444,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Invariant);
}

#[test]
fn test_invalid_layout_is_rejected_at_startup() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let config = ReorderConfig {
        layout: LayoutConfig {
            factor: 10,
            ..LayoutConfig::default()
        },
        ..ReorderConfig::default()
    };
    let err = reorder(records(&GENESIS_TIERS), &hash, &config).unwrap_err();
    assert!(matches!(err, Error::InvalidLayout(_)));
}

#[test]
fn test_alternative_block_size() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let config = ReorderConfig {
        layout: LayoutConfig {
            range_size: 8,
            factor: 3,
            addend: 5,
            cycle_length: 4,
        },
        ..ReorderConfig::default()
    };
    let tiers = [(Rarity::Uncommon, 16), (Rarity::Epic, 8)];
    let artifacts = reorder(records(&tiers), &hash, &config).unwrap();
    assert_eq!(artifacts.rarity_plan.len(), 3);
    assert_eq!(artifacts.records.len(), 24);
    for block in artifacts.records.chunks(8) {
        let rarity = block[0].record.rarity();
        assert!(block.iter().all(|r| r.record.rarity() == rarity));
    }
}
