use std::fmt;
use std::marker::PhantomData;

use crate::Kind;

const SIZE: usize = 4;

/// Bitset over the token kinds of one language.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxSet<K> {
    bits: [u64; SIZE],
    _marker: PhantomData<K>,
}

impl<K: Kind> SyntaxSet<K> {
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    pub const EMPTY: Self = Self { bits: [0; SIZE], _marker: PhantomData };

    fn from_kind(kind: K) -> Self {
        let kind = kind.into_raw();

        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;

        debug_assert!(
            slot_index < SIZE,
            "Index out of bounds. Increase the size of the bitset array."
        );

        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        let mut bits = [0; SIZE];
        bits[slot_index] = mask;

        Self { bits, _marker: PhantomData }
    }

    pub fn union(mut self, other: &Self) -> Self {
        for (slot, other) in self.bits.iter_mut().zip(other.bits) {
            *slot |= other;
        }

        self
    }

    pub fn new<const N: usize>(kinds: [K; N]) -> Self {
        kinds.into_iter().fold(Self::EMPTY, |set, kind| set.union(&Self::from_kind(kind)))
    }

    pub fn contains(&self, kind: K) -> bool {
        let kind = kind.into_raw();
        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;
        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        self.bits.get(slot_index).is_some_and(|slot| slot & mask != 0)
    }
}

impl<K: Kind> Default for SyntaxSet<K> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<K> fmt::Debug for SyntaxSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxSet").field("bits", &self.bits).finish()
    }
}
