use std::fmt::Display;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Sub;

use ethereum_types::U256;
use fake::Dummy;
use fake::Faker;

use crate::gen_newtype_from;

/// Native token amount in wei.
///
/// Balances are unsigned by construction, so they can never go negative; the
/// arithmetic here panics on overflow and underflow, which only a core bug
/// can reach (callers check funds before subtracting).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Wei(U256);

impl Wei {
    pub const ZERO: Wei = Wei(U256::zero());

    /// Check if current value is zero.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    pub fn to_big_endian(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }
}

impl Display for Wei {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Dummy<Faker> for Wei {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        rng.next_u64().into()
    }
}

// -----------------------------------------------------------------------------
// Arithmetic
// -----------------------------------------------------------------------------
impl Add for Wei {
    type Output = Wei;

    fn add(self, rhs: Self) -> Self::Output {
        Wei(self.0 + rhs.0)
    }
}

impl Sub for Wei {
    type Output = Wei;

    fn sub(self, rhs: Self) -> Self::Output {
        Wei(self.0 - rhs.0)
    }
}

impl Mul<u64> for Wei {
    type Output = Wei;

    fn mul(self, rhs: u64) -> Self::Output {
        Wei(self.0 * U256::from(rhs))
    }
}

// -----------------------------------------------------------------------------
// Conversions: Other -> Self
// -----------------------------------------------------------------------------
gen_newtype_from!(self = Wei, other = u8, u16, u32, u64, u128, usize, U256);

// -----------------------------------------------------------------------------
// Conversions: Self -> Other
// -----------------------------------------------------------------------------
impl From<Wei> for U256 {
    fn from(value: Wei) -> Self {
        value.0
    }
}
