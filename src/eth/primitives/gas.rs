use std::fmt::Display;

use fake::Dummy;
use fake::Faker;

use crate::gen_newtype_from;

/// Amount of computational effort, in gas units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Gas(u64);

impl Gas {
    pub const ZERO: Gas = Gas(0u64);

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for Gas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Dummy<Faker> for Gas {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        rng.next_u64().into()
    }
}

// -----------------------------------------------------------------------------
// Conversions: Other -> Self
// -----------------------------------------------------------------------------
gen_newtype_from!(self = Gas, other = u8, u16, u32, u64);

// -----------------------------------------------------------------------------
// Conversions: Self -> Other
// -----------------------------------------------------------------------------
impl From<Gas> for u64 {
    fn from(value: Gas) -> Self {
        value.0
    }
}
