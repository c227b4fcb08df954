use std::fmt::Display;

use ethereum_types::H256;
use fake::Dummy;
use fake::Faker;

use crate::gen_newtype_from;

// -----------------------------------------------------------------------------
// SlotIndex
// -----------------------------------------------------------------------------

/// Key of an account storage slot.
///
/// Indexes order lexicographically by their bytes (big-endian numeric order),
/// which is the order storage changes appear in at commit.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct SlotIndex(H256);

impl SlotIndex {
    pub const ZERO: SlotIndex = SlotIndex(H256::zero());

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Dummy<Faker> for SlotIndex {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(H256(bytes))
    }
}

gen_newtype_from!(self = SlotIndex, other = H256, [u8; 32]);

impl From<u64> for SlotIndex {
    fn from(value: u64) -> Self {
        Self(H256::from_low_u64_be(value))
    }
}

impl From<SlotIndex> for H256 {
    fn from(value: SlotIndex) -> Self {
        value.0
    }
}

// -----------------------------------------------------------------------------
// SlotValue
// -----------------------------------------------------------------------------

/// Value held by an account storage slot. The zero value is equivalent to the
/// slot being absent.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct SlotValue(H256);

impl SlotValue {
    pub const ZERO: SlotValue = SlotValue(H256::zero());

    /// Check if current value is zero.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for SlotValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Dummy<Faker> for SlotValue {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(H256(bytes))
    }
}

gen_newtype_from!(self = SlotValue, other = H256, [u8; 32]);

impl From<u64> for SlotValue {
    fn from(value: u64) -> Self {
        Self(H256::from_low_u64_be(value))
    }
}

impl From<SlotValue> for H256 {
    fn from(value: SlotValue) -> Self {
        value.0
    }
}
