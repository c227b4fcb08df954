use crate::eth::primitives::Hash;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::Wei;

/// Committed description of one account: the 4-tuple the trie stores per
/// address.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Account {
    pub balance: Wei,
    pub nonce: Nonce,
    pub code_hash: Hash,
    pub storage_root: Hash,
}

impl Account {
    /// Checks account emptiness as defined by EIP-161: no balance, no nonce
    /// and no code.
    pub fn is_empty(&self) -> bool {
        self.balance.is_zero() && self.nonce.is_zero() && self.code_hash == Hash::EMPTY_CODE
    }
}

impl Default for Account {
    fn default() -> Self {
        Self {
            balance: Wei::ZERO,
            nonce: Nonce::ZERO,
            code_hash: Hash::EMPTY_CODE,
            storage_root: Hash::EMPTY_TRIE,
        }
    }
}
