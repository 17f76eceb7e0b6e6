use genesis_core::{BlockHash, Error};
use genesis_tests::SEED;

#[test]
fn test_hash_roundtrip() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    assert_eq!(hash.as_str(), SEED);
    assert_eq!(hash.to_hex(), SEED);
    assert_eq!(hash.as_bytes()[0], 0x12);
    assert_eq!(hash.as_bytes()[31], 0xef);
}

#[test]
fn test_raw_string_is_kept_verbatim() {
    let upper = "0x1234567890ABCDEF1234567890ABCDEF1234567890ABCDEF1234567890ABCDEF";
    let hash = BlockHash::from_hex(upper).unwrap();
    assert_eq!(hash.as_str(), upper);
    // same bytes, but a different pre-image
    assert_eq!(hash.to_hex(), SEED);
    let lower = BlockHash::from_hex(SEED).unwrap();
    assert_eq!(hash.as_bytes(), lower.as_bytes());
    assert_ne!(hash.step_digest(1), lower.step_digest(1));
}

#[test]
fn test_step_digest_deterministic() {
    let hash = BlockHash::from_hex(SEED).unwrap();
    assert_eq!(hash.step_digest(42), hash.step_digest(42));
    assert_ne!(hash.step_digest(42), hash.step_digest(43));
}

#[test]
fn test_invalid_length() {
    let err = BlockHash::from_hex("0x1234").unwrap_err();
    assert!(matches!(err, Error::InvalidBlockHash(_)));
}

#[test]
fn test_invalid_hex() {
    let bad = format!("0x{}", "zz".repeat(32));
    let err = BlockHash::from_hex(&bad).unwrap_err();
    assert!(matches!(err, Error::HexDecode(_)));
    assert_eq!(err.kind(), genesis_core::ErrorKind::Upstream);
}

#[test]
fn test_serde_as_string() {
    let hash: BlockHash = serde_json::from_str(&format!("\"{SEED}\"")).unwrap();
    assert_eq!(serde_json::to_string(&hash).unwrap(), format!("\"{SEED}\""));
    assert!(serde_json::from_str::<BlockHash>("\"0xabc\"").is_err());
}
