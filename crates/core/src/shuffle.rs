//! Replayable Fisher-Yates shuffle driven by a public block hash.
//!
//! Step `i` (from `len - 1` down to `1`) swaps element `i` with element
//! `pick(i)`, where `pick(i) < i + 1`. With [`BlockHashSource`] the pick is
//! `keccak256("{i}{hash}")`, truncated to its last four bytes (big-endian) and
//! reduced modulo `i + 1`, so anyone holding the hash can replay every swap.

use crate::seed::BlockHash;
use tracing::trace;

/// Supplies the swap target for each step of the shuffle.
pub trait SwapSource {
    /// Index in `0..=step` to swap with `step`.
    fn pick(&self, step: usize) -> usize;
}

/// Production swap source hashing the step counter with the block hash.
#[derive(Debug, Clone)]
pub struct BlockHashSource<'a> {
    hash: &'a BlockHash,
}

impl<'a> BlockHashSource<'a> {
    pub fn new(hash: &'a BlockHash) -> Self {
        Self { hash }
    }

    /// The raw 32-bit sample drawn for `step`, before the modulo reduction.
    pub fn sample(&self, step: usize) -> u32 {
        let digest = self.hash.step_digest(step);
        let mut tail = [0u8; 4];
        tail.copy_from_slice(&digest[28..]);
        u32::from_be_bytes(tail)
    }
}

impl SwapSource for BlockHashSource<'_> {
    fn pick(&self, step: usize) -> usize {
        (u64::from(self.sample(step)) % (step as u64 + 1)) as usize
    }
}

/// Permute `items` in place with the swap sequence of `source`.
pub fn shuffle<T, S>(items: &mut [T], source: &S)
where
    S: SwapSource + ?Sized,
{
    for step in (1..items.len()).rev() {
        let target = source.pick(step);
        trace!("shuffle step {} swaps with {}", step, target);
        items.swap(step, target);
    }
}

/// The index array `0..len` after shuffling.
///
/// `shuffled_indices(len, s)[j]` names the element that [`shuffle`] with the same
/// source moves to position `j`.
pub fn shuffled_indices<S>(len: usize, source: &S) -> Vec<usize>
where
    S: SwapSource + ?Sized,
{
    let mut index: Vec<usize> = (0..len).collect();
    shuffle(&mut index, source);
    index
}

/// Place `items[i]` at position `permutation[i]`.
///
/// Returns `None` when `permutation` is not a permutation of `0..items.len()`.
pub fn scatter<T>(items: Vec<T>, permutation: &[usize]) -> Option<Vec<T>> {
    if items.len() != permutation.len() {
        return None;
    }
    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(items.len()).collect();
    for (item, &target) in items.into_iter().zip(permutation) {
        let slot = slots.get_mut(target)?;
        if slot.is_some() {
            return None;
        }
        *slot = Some(item);
    }
    slots.into_iter().collect()
}
