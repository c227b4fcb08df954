use std::fmt::Display;

use ethereum_types::H256;
use fake::Dummy;
use fake::Faker;

use crate::eth::primitives::Hash;
use crate::gen_newtype_from;

/// Indexed log parameter.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LogTopic(H256);

impl Display for LogTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", const_hex::encode_prefixed(self.0))
    }
}

impl Dummy<Faker> for LogTopic {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(H256(bytes))
    }
}

// -----------------------------------------------------------------------------
// Conversions: Other -> Self
// -----------------------------------------------------------------------------
gen_newtype_from!(self = LogTopic, other = H256, [u8; 32]);

impl From<Hash> for LogTopic {
    fn from(value: Hash) -> Self {
        Self(value.into())
    }
}

// -----------------------------------------------------------------------------
// Conversions: Self -> Other
// -----------------------------------------------------------------------------
impl From<LogTopic> for H256 {
    fn from(value: LogTopic) -> Self {
        value.0
    }
}
