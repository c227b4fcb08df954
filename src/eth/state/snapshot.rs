use std::collections::HashMap;

use crate::eth::primitives::Account;
use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Hash;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::state::Object;

/// Read-only view of committed state consumed by the transaction layer.
///
/// Implementations must stay stable for the lifetime of every transaction
/// bound to them and are free to cache. Concurrent transactions over distinct
/// snapshots are permitted and mutually invisible.
pub trait Snapshot {
    /// Returns the committed account at the address, if any.
    fn get_account(&self, address: Address) -> anyhow::Result<Option<Account>>;

    /// Resolves contract code by its hash.
    fn get_code(&self, code_hash: Hash, address: Address) -> Option<Bytes>;

    /// Reads a committed storage slot under the given storage root. Absent
    /// slots read as zero.
    fn get_storage(&self, address: Address, storage_root: Hash, index: SlotIndex) -> SlotValue;

    /// Applies a committed change list, producing the successor snapshot and
    /// its state root.
    fn commit(&self, objects: &[Object]) -> (Self, Hash)
    where
        Self: Sized;
}

/// Hash-map-backed [`Snapshot`] for genesis construction and tests.
///
/// Storage maps are keyed by storage root, so an account re-created inside a
/// transaction reads its committed slots against the empty root and sees
/// zeros even when the address had storage before. The state root is a keccak
/// digest of the sorted content: deterministic, but not a Merkle root (the
/// trie layer is an external collaborator).
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    accounts: HashMap<Address, Account>,
    code: HashMap<Hash, Bytes>,
    storage: HashMap<Hash, HashMap<SlotIndex, SlotValue>>,
}

impl InMemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: installs a committed account.
    pub fn with_account(mut self, address: Address, account: Account) -> Self {
        self.accounts.insert(address, account);
        self
    }

    /// Builder: installs a committed storage slot, wiring the owning
    /// account's storage root to a synthetic non-empty root.
    pub fn with_slot(mut self, address: Address, index: SlotIndex, value: SlotValue) -> Self {
        let account = self.accounts.entry(address).or_default();
        if account.storage_root == Hash::EMPTY_TRIE {
            account.storage_root = Hash::keccak(address.as_bytes());
        }
        self.storage.entry(account.storage_root).or_default().insert(index, value);
        self
    }

    /// Builder: installs committed contract code.
    pub fn with_code(mut self, address: Address, code: Bytes) -> Self {
        let code_hash = Hash::keccak(&code);
        self.accounts.entry(address).or_default().code_hash = code_hash;
        self.code.insert(code_hash, code);
        self
    }

    fn state_digest(&self) -> Hash {
        let mut addresses: Vec<&Address> = self.accounts.keys().collect();
        addresses.sort();

        let mut buffer = Vec::with_capacity(addresses.len() * 124);
        for address in addresses {
            let account = &self.accounts[address];
            buffer.extend_from_slice(address.as_bytes());
            buffer.extend_from_slice(&account.balance.to_big_endian());
            buffer.extend_from_slice(&account.nonce.as_u64().to_be_bytes());
            buffer.extend_from_slice(account.code_hash.as_bytes());
            buffer.extend_from_slice(account.storage_root.as_bytes());
        }
        Hash::keccak(&buffer)
    }
}

fn storage_digest(slots: &HashMap<SlotIndex, SlotValue>) -> Hash {
    let mut indexes: Vec<&SlotIndex> = slots.keys().collect();
    indexes.sort();

    let mut buffer = Vec::with_capacity(indexes.len() * 64);
    for index in indexes {
        buffer.extend_from_slice(index.as_bytes());
        buffer.extend_from_slice(slots[index].as_bytes());
    }
    Hash::keccak(&buffer)
}

impl Snapshot for InMemorySnapshot {
    fn get_account(&self, address: Address) -> anyhow::Result<Option<Account>> {
        Ok(self.accounts.get(&address).cloned())
    }

    fn get_code(&self, code_hash: Hash, _address: Address) -> Option<Bytes> {
        self.code.get(&code_hash).cloned()
    }

    fn get_storage(&self, _address: Address, storage_root: Hash, index: SlotIndex) -> SlotValue {
        self.storage
            .get(&storage_root)
            .and_then(|slots| slots.get(&index))
            .copied()
            .unwrap_or(SlotValue::ZERO)
    }

    fn commit(&self, objects: &[Object]) -> (Self, Hash) {
        let mut next = self.clone();

        for object in objects {
            if object.deleted {
                next.accounts.remove(&object.address);
                continue;
            }

            let mut slots = next.storage.get(&object.storage_root).cloned().unwrap_or_default();
            for entry in &object.storage {
                if entry.deleted {
                    slots.remove(&entry.key);
                } else {
                    slots.insert(entry.key, entry.value);
                }
            }

            let storage_root = if slots.is_empty() { Hash::EMPTY_TRIE } else { storage_digest(&slots) };
            if storage_root != Hash::EMPTY_TRIE {
                next.storage.insert(storage_root, slots);
            }

            if object.dirty_code {
                next.code.insert(object.code_hash, object.code.clone());
            }

            next.accounts.insert(
                object.address,
                Account {
                    balance: object.balance,
                    nonce: object.nonce,
                    code_hash: object.code_hash,
                    storage_root,
                },
            );
        }

        let root = next.state_digest();
        (next, root)
    }
}
