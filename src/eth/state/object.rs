use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Hash;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::primitives::Wei;

/// Post-transaction image of one account, produced by commit and consumed by
/// the trie layer.
///
/// The change list carries no ordering metadata: the producer's ordering
/// (ascending address, then ascending slot key) IS the contract, and it is
/// what makes the resulting state root deterministic across implementations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Object {
    pub address: Address,
    pub nonce: Nonce,
    pub balance: Wei,
    pub code_hash: Hash,
    pub storage_root: Hash,
    pub dirty_code: bool,
    pub code: Bytes,
    pub deleted: bool,
    pub storage: Vec<StorageObject>,
}

/// One storage-slot change inside an [`Object`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StorageObject {
    pub key: SlotIndex,
    pub value: SlotValue,
    pub deleted: bool,
}
