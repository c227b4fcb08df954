use std::fmt::Display;

use fake::Dummy;
use fake::Faker;

use crate::gen_newtype_from;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct BlockNumber(u64);

impl BlockNumber {
    pub const ZERO: BlockNumber = BlockNumber(0u64);

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for BlockNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Dummy<Faker> for BlockNumber {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        rng.next_u64().into()
    }
}

// -----------------------------------------------------------------------------
// Conversions: Other -> Self
// -----------------------------------------------------------------------------
gen_newtype_from!(self = BlockNumber, other = u8, u16, u32, u64);

// -----------------------------------------------------------------------------
// Conversions: Self -> Other
// -----------------------------------------------------------------------------
impl From<BlockNumber> for u64 {
    fn from(value: BlockNumber) -> Self {
        value.0
    }
}
