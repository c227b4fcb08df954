use std::fmt::Display;

use ethereum_types::H256;
use fake::Dummy;
use fake::Faker;
use hex_literal::hex;

use crate::gen_newtype_from;

/// 32-byte hash value.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Hash(H256);

impl Hash {
    /// Hash with all bytes zeroed.
    pub const ZERO: Hash = Hash(H256::zero());

    /// Keccak-256 of the empty byte string. Code hash of every account without code.
    pub const EMPTY_CODE: Hash = Hash::new_const(hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"));

    /// Root of the empty storage trie.
    pub const EMPTY_TRIE: Hash = Hash::new_const(hex!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"));

    /// Const constructor.
    pub const fn new_const(bytes: [u8; 32]) -> Self {
        Self(H256(bytes))
    }

    /// Keccak-256 digest of the given bytes.
    pub fn keccak(data: impl AsRef<[u8]>) -> Self {
        Self(keccak_hash::keccak(data))
    }

    /// Check if current hash is the zero hash.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", const_hex::encode_prefixed(self.0))
    }
}

impl Dummy<Faker> for Hash {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(H256(bytes))
    }
}

// -----------------------------------------------------------------------------
// Conversions: Other -> Self
// -----------------------------------------------------------------------------
gen_newtype_from!(self = Hash, other = H256, [u8; 32]);

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

// -----------------------------------------------------------------------------
// Conversions: Self -> Other
// -----------------------------------------------------------------------------
impl From<Hash> for H256 {
    fn from(value: Hash) -> Self {
        value.0
    }
}
