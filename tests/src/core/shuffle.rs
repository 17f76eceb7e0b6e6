use genesis_core::{shuffle, shuffled_indices, BlockHash, BlockHashSource, SwapSource};
use genesis_tests::SEED;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

fn random_hash(rng: &mut StdRng) -> BlockHash {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    BlockHash::from_hex(&format!("0x{hex}")).unwrap()
}

#[test]
fn test_shuffle_is_permutation() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let hash = random_hash(&mut rng);
        let n = rng.random_range(0..500);
        let mut index = shuffled_indices(n, &BlockHashSource::new(&hash));
        index.sort_unstable();
        assert_eq!(index, (0..n).collect::<Vec<_>>());
    }
}

#[test]
fn test_shuffle_is_reproducible() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let first = shuffled_indices(4880, &BlockHashSource::new(&hash));
    let again = BlockHash::from_hex(SEED).unwrap();
    let second = shuffled_indices(4880, &BlockHashSource::new(&again));
    assert_eq!(first, second);
}

#[test]
fn test_different_seeds_different_orders() {
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_hash(&mut rng);
    let b = random_hash(&mut rng);
    assert_ne!(
        shuffled_indices(100, &BlockHashSource::new(&a)),
        shuffled_indices(100, &BlockHashSource::new(&b))
    );
}

#[test]
fn test_picks_stay_in_range() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    let source = BlockHashSource::new(&hash);
    for step in 1..2000 {
        assert!(source.pick(step) <= step);
    }
}

#[test]
fn test_known_rarity_plan_prefix() {
    // 122 genesis blocks: 77 Common, 29 Uncommon, 11 Rare, 4 Epic, 1 Legendary
    let mut plan: Vec<u8> = [(0u8, 77usize), (1, 29), (2, 11), (3, 4), (4, 1)]
        .into_iter()
        .flat_map(|(tier, blocks)| std::iter::repeat(tier).take(blocks))
        .collect();
    let hash = BlockHash::from_hex(SEED).unwrap();
    shuffle(&mut plan, &BlockHashSource::new(&hash));
    assert_eq!(&plan[..12], [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 3, 1]);
    assert_eq!(plan.iter().position(|&t| t == 4), Some(115));
}
