use genesis_core::{BlockLayout, LayoutConfig, PartType};

fn layout() -> BlockLayout {
    BlockLayout::new(LayoutConfig::default()).unwrap()
}

#[test]
fn test_affine_pair_across_blocks() {
    let layout = layout();
    for k in 0..130u64 {
        for x in 1..=40u64 {
            let p = x + k * 40;
            let y = layout.convert(p).unwrap();
            assert_eq!(layout.revert(y).unwrap(), p);
            assert_eq!(layout.convert(layout.revert(p).unwrap()).unwrap(), p);
            // translation invariance
            assert_eq!(y, layout.convert(x).unwrap() + k * 40);
        }
    }
}

#[test]
fn test_lane_pair_across_blocks() {
    let layout = layout();
    for k in [0u64, 1, 7, 121, 10_000] {
        for x in 1..=40u64 {
            let p = x + k * 40;
            let y = layout.transform(p).unwrap();
            assert_eq!(layout.reverse_transform(y).unwrap(), p);
            assert_eq!(layout.transform(layout.reverse_transform(p).unwrap()).unwrap(), p);
            assert_eq!(y, layout.transform(x).unwrap() + k * 40);
        }
    }
}

#[test]
fn test_lane_transform_runs_share_lane() {
    let layout = layout();
    // inverse images of each run of 10 outputs all sit in one residue class mod 4
    for run in 0..4u64 {
        let lanes: Vec<u64> = (1..=10)
            .map(|slot| (layout.reverse_transform(run * 10 + slot).unwrap() - 1) % 4)
            .collect();
        assert!(lanes.iter().all(|&lane| lane == run), "run {run}: {lanes:?}");
    }
}

#[test]
fn test_each_block_has_ten_tokens_per_part() {
    let layout = layout();
    for k in 0..3u64 {
        let mut counts = [0usize; 4];
        for y in (k * 40 + 1)..=(k * 40 + 40) {
            counts[layout.part_type(y).unwrap().index()] += 1;
        }
        assert_eq!(counts, [10; 4]);
    }
}

#[test]
fn test_first_tokens_part_types() {
    let layout = layout();
    let parts: Vec<PartType> = (1..=4).map(|y| layout.part_type(y).unwrap()).collect();
    // token 1 <- position 4, token 2 <- 27, token 3 <- 10, token 4 <- 33
    assert_eq!(
        parts,
        [PartType::Head, PartType::Legs, PartType::Head, PartType::Arms]
    );
}

#[test]
fn test_config_from_json_uses_defaults() {
    let config: LayoutConfig = serde_json::from_str(r#"{ "addend": 3 }"#).unwrap();
    assert_eq!(config.range_size, 40);
    assert_eq!(config.factor, 7);
    assert_eq!(config.addend, 3);
    let layout = BlockLayout::new(config).unwrap();
    for x in 1..=80 {
        assert_eq!(layout.revert(layout.convert(x).unwrap()).unwrap(), x);
    }
}
