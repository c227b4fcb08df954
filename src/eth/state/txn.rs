use crate::eth::evm::EvmError;
use crate::eth::primitives::Account;
use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Hash;
use crate::eth::primitives::Log;
use crate::eth::primitives::LogTopic;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::Revision;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::primitives::StorageStatus;
use crate::eth::primitives::Wei;
use crate::eth::state::journal::Journal;
use crate::eth::state::journal::JournalKey;
use crate::eth::state::journal::JournalValue;
use crate::eth::state::Object;
use crate::eth::state::Snapshot;
use crate::eth::state::StateObject;
use crate::eth::state::StorageObject;
use crate::ext::not;
use crate::if_else;

/// Mutable transaction layer over an immutable [`Snapshot`].
///
/// Reads fall through the journal to the snapshot; writes land in the
/// journal. Because the journal is persistent, [`Txn::snapshot`] publishes
/// the current version in O(1) and [`Txn::revert_to`] restores one in O(1).
///
/// A `Txn` is owned by a single execution context and is single-use:
/// [`Txn::commit`] consumes it.
#[derive(Debug)]
pub struct Txn<S: Snapshot> {
    snapshot: S,
    journal: Journal,
    versions: Vec<Journal>,
    revision: Revision,
}

impl<S: Snapshot> Txn<S> {
    pub fn new(snapshot: S) -> Self {
        Self {
            snapshot,
            journal: Journal::default(),
            versions: Vec::new(),
            revision: Revision::Frontier,
        }
    }

    /// Sets the protocol revision that drives storage gas metering.
    pub fn with_revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }

    fn is_revision(&self, revision: Revision) -> bool {
        self.revision >= revision
    }

    // -------------------------------------------------------------------------
    // Journal versions
    // -------------------------------------------------------------------------

    /// Publishes the current journal version and returns its identifier.
    pub fn snapshot(&mut self) -> usize {
        let id = self.versions.len();
        self.versions.push(self.journal.clone());
        id
    }

    /// Restores a previously published journal version. Later versions stay
    /// published, so new identifiers keep growing after a revert.
    ///
    /// # Panics
    ///
    /// Panics if `id` was never returned by [`Txn::snapshot`].
    pub fn revert_to(&mut self, id: usize) {
        assert!(id < self.versions.len(), "unknown journal version {id}");
        self.journal = self.versions[id].clone();
    }

    // -------------------------------------------------------------------------
    // Accounts
    // -------------------------------------------------------------------------

    /// Materialises a copy of the visible object at the address, reading
    /// through the journal into the snapshot.
    fn get_state_object(&self, address: Address) -> Option<StateObject> {
        if let Some(object) = self.journal.object(address) {
            if object.deleted {
                return None;
            }
            return Some(object.clone());
        }

        let account = match self.snapshot.get_account(address) {
            Ok(account) => account?,
            Err(e) => {
                tracing::warn!(reason = ?e, %address, "failed to read account from snapshot");
                return None;
            }
        };
        Some(StateObject::from_account(account))
    }

    /// Routes every mutation: materialise (or create), mutate, reinsert.
    fn upsert_account(&mut self, address: Address, create: bool, mutator: impl FnOnce(&mut StateObject)) {
        let object = match self.get_state_object(address) {
            Some(object) => Some(object),
            None if create => Some(StateObject::default()),
            None => None,
        };

        if let Some(mut object) = object {
            mutator(&mut object);
            self.journal.insert_object(address, object);
        }
    }

    /// Returns the visible account at the address.
    pub fn get_account(&self, address: Address) -> Option<Account> {
        self.get_state_object(address).map(|object| object.account)
    }

    /// Installs a fresh account at the address, preserving any balance
    /// already visible there (address-collision safety). Nonce, code and the
    /// storage overlay are cleared.
    pub fn create_account(&mut self, address: Address) {
        let mut object = StateObject::default();
        if let Some(prev) = self.get_state_object(address) {
            object.account.balance = prev.account.balance;
        }
        self.journal.insert_object(address, object);
    }

    /// Materialises the account without changing it, marking it for EIP-161
    /// cleanup (precompiles touched by calls, etc).
    pub fn touch_account(&mut self, address: Address) {
        self.upsert_account(address, true, |_| {});
    }

    /// True iff a non-deleted object is visible at the address.
    pub fn exist(&self, address: Address) -> bool {
        self.get_state_object(address).is_some()
    }

    /// True if the address is absent or the visible object is empty
    /// (EIP-161).
    pub fn empty(&self, address: Address) -> bool {
        match self.get_state_object(address) {
            Some(object) => object.is_empty(),
            None => true,
        }
    }

    // -------------------------------------------------------------------------
    // Balance
    // -------------------------------------------------------------------------

    pub fn add_balance(&mut self, address: Address, amount: Wei) {
        self.upsert_account(address, true, |object| {
            object.account.balance = object.account.balance + amount;
        });
    }

    /// Reduces the balance at the address. Subtracting zero is a noop that
    /// does not even materialise the account.
    pub fn sub_balance(&mut self, address: Address, amount: Wei) -> Result<(), EvmError> {
        if amount.is_zero() {
            return Ok(());
        }

        if self.get_balance(address) < amount {
            return Err(EvmError::NotEnoughFunds);
        }

        self.upsert_account(address, true, |object| {
            object.account.balance = object.account.balance - amount;
        });
        Ok(())
    }

    pub fn set_balance(&mut self, address: Address, balance: Wei) {
        self.upsert_account(address, true, |object| {
            object.account.balance = balance;
        });
    }

    pub fn get_balance(&self, address: Address) -> Wei {
        match self.get_state_object(address) {
            Some(object) => object.account.balance,
            None => Wei::ZERO,
        }
    }

    /// Credits a block-production reward. A suicided account is replaced by a
    /// fresh one holding exactly the reward.
    pub fn add_sealing_reward(&mut self, address: Address, amount: Wei) {
        self.upsert_account(address, true, |object| {
            if object.suicided {
                *object = StateObject::default();
                object.account.balance = amount;
            } else {
                object.account.balance = object.account.balance + amount;
            }
        });
    }

    // -------------------------------------------------------------------------
    // Nonce
    // -------------------------------------------------------------------------

    pub fn incr_nonce(&mut self, address: Address) {
        self.upsert_account(address, true, |object| {
            object.account.nonce = object.account.nonce.next();
        });
    }

    pub fn set_nonce(&mut self, address: Address, nonce: Nonce) {
        self.upsert_account(address, true, |object| {
            object.account.nonce = nonce;
        });
    }

    pub fn get_nonce(&self, address: Address) -> Nonce {
        match self.get_state_object(address) {
            Some(object) => object.account.nonce,
            None => Nonce::ZERO,
        }
    }

    // -------------------------------------------------------------------------
    // Code
    // -------------------------------------------------------------------------

    pub fn set_code(&mut self, address: Address, code: Bytes) {
        self.upsert_account(address, true, |object| {
            object.account.code_hash = Hash::keccak(&code);
            object.code = code;
            object.dirty_code = true;
        });
    }

    /// Code visible at the address: in-memory bytes when dirty, otherwise
    /// resolved through the snapshot by code hash.
    pub fn get_code(&self, address: Address) -> Bytes {
        let Some(object) = self.get_state_object(address) else {
            return Bytes::default();
        };

        if object.dirty_code {
            return object.code;
        }
        self.snapshot.get_code(object.account.code_hash, address).unwrap_or_default()
    }

    pub fn get_code_size(&self, address: Address) -> usize {
        self.get_code(address).len()
    }

    /// Code hash of the account, or the zero hash when the account is empty
    /// or absent.
    pub fn get_code_hash(&self, address: Address) -> Hash {
        if self.empty(address) {
            return Hash::ZERO;
        }
        match self.get_state_object(address) {
            Some(object) => object.account.code_hash,
            None => Hash::ZERO,
        }
    }

    // -------------------------------------------------------------------------
    // Suicide
    // -------------------------------------------------------------------------

    /// Marks the account as suicided, zeroing its balance immediately.
    /// Deletion itself is deferred to [`Txn::clean_delete_objects`]. Returns
    /// false if the address is absent or already suicided.
    pub fn suicide(&mut self, address: Address) -> bool {
        let mut suicided = false;
        self.upsert_account(address, false, |object| {
            suicided = not(object.suicided);
            object.suicided = true;
            object.account.balance = Wei::ZERO;
        });
        suicided
    }

    pub fn has_suicided(&self, address: Address) -> bool {
        self.get_state_object(address).is_some_and(|object| object.suicided)
    }

    // -------------------------------------------------------------------------
    // Storage
    // -------------------------------------------------------------------------

    /// Writes a storage slot and reports the write's effect for gas
    /// metering, maintaining the refund counter across protocol revisions
    /// (EIP-1283 accounting from Constantinople, reverted in Petersburg,
    /// EIP-2200 values from Istanbul).
    pub fn set_storage(&mut self, address: Address, index: SlotIndex, value: SlotValue) -> StorageStatus {
        // storage dirtied by previous writes of this transaction
        let current = self.get_state(address, index);
        if current == value {
            return StorageStatus::Unchanged;
        }

        // slot content before this transaction started
        let original = self.get_committed_state(address, index);

        self.set_state(address, index, value);

        let is_istanbul = self.is_revision(Revision::Istanbul);
        let legacy_gas_metering = not(is_istanbul) && (self.is_revision(Revision::Petersburg) || not(self.is_revision(Revision::Constantinople)));

        if legacy_gas_metering {
            if current.is_zero() {
                return StorageStatus::Added;
            }
            if value.is_zero() {
                self.add_refund(15000);
                return StorageStatus::Deleted;
            }
            return StorageStatus::Modified;
        }

        // first write touching this slot in this transaction
        if original == current {
            if original.is_zero() {
                return StorageStatus::Added;
            }
            if value.is_zero() {
                self.add_refund(15000);
                return StorageStatus::Deleted;
            }
            return StorageStatus::Modified;
        }

        if not(original.is_zero()) {
            if current.is_zero() {
                // slot was cleared earlier in this transaction and is being recreated
                self.sub_refund(15000);
            } else if value.is_zero() {
                self.add_refund(15000);
            }
        }
        if value == original {
            if original.is_zero() {
                // storage used as transient memory within one transaction
                self.add_refund(if_else!(is_istanbul, 19200, 19800));
            } else {
                self.add_refund(if_else!(is_istanbul, 4200, 4800));
            }
        }
        StorageStatus::ModifiedAgain
    }

    /// Writes a slot into the overlay. A zero value becomes a tombstone.
    pub fn set_state(&mut self, address: Address, index: SlotIndex, value: SlotValue) {
        self.upsert_account(address, true, |object| {
            if value.is_zero() {
                object.slot_overlay.insert(index, None);
            } else {
                object.slot_overlay.insert(index, Some(value));
            }
        });
    }

    /// Reads a slot: overlay first (tombstones read as zero), then the
    /// snapshot under the account's storage root.
    pub fn get_state(&self, address: Address, index: SlotIndex) -> SlotValue {
        let Some(object) = self.get_state_object(address) else {
            return SlotValue::ZERO;
        };

        match object.slot_overlay.get(&index) {
            Some(None) => SlotValue::ZERO,
            Some(Some(value)) => *value,
            None => self.snapshot.get_storage(address, object.account.storage_root, index),
        }
    }

    /// Reads the slot as committed before this transaction, bypassing the
    /// overlay. The storage root still comes from the overlay account, so a
    /// freshly created account reads against the empty trie.
    pub fn get_committed_state(&self, address: Address, index: SlotIndex) -> SlotValue {
        match self.get_state_object(address) {
            Some(object) => self.snapshot.get_storage(address, object.account.storage_root, index),
            None => SlotValue::ZERO,
        }
    }

    // -------------------------------------------------------------------------
    // Refund counter
    // -------------------------------------------------------------------------

    pub fn add_refund(&mut self, gas: u64) {
        let refund = self.journal.refund() + gas;
        self.journal.set_refund(refund);
    }

    /// Only the storage gas metering calls this; any valid EVM trace keeps
    /// the counter non-negative.
    pub fn sub_refund(&mut self, gas: u64) {
        let refund = self.journal.refund();
        debug_assert!(refund >= gas, "refund counter underflow: {refund} - {gas}");
        self.journal.set_refund(refund.wrapping_sub(gas));
    }

    pub fn get_refund(&self) -> u64 {
        self.journal.refund()
    }

    // -------------------------------------------------------------------------
    // Logs
    // -------------------------------------------------------------------------

    pub fn emit_log(&mut self, address: Address, topics: &[LogTopic], data: &[u8]) {
        let log = Log {
            address,
            topics: topics.to_vec(),
            data: Bytes::from(data),
        };
        self.journal.push_log(log);
    }

    /// Returns the accumulated logs, clearing them.
    pub fn logs(&mut self) -> Vec<Log> {
        self.journal.take_logs()
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    /// Marks suicided (and, from Spurious Dragon, empty) objects as deleted
    /// and clears the refund counter. Must run exactly once, at transaction
    /// end: running earlier would sweep accounts that were only touched.
    pub fn clean_delete_objects(&mut self, delete_empty: bool) {
        let remove: Vec<Address> = self
            .journal
            .iter()
            .filter_map(|(key, value)| match (key, value) {
                (JournalKey::Account(address), JournalValue::Object(object)) if object.suicided || (delete_empty && object.is_empty()) => Some(*address),
                _ => None,
            })
            .collect();

        for address in remove {
            if let Some(object) = self.journal.object(address) {
                let mut object = object.clone();
                object.deleted = true;
                self.journal.insert_object(address, object);
            }
        }

        self.journal.clear_refund();
    }

    /// Serialises the journal into the ordered change list consumed by the
    /// trie layer, walking addresses and slot keys in ascending order.
    pub fn commit(self) -> Vec<Object> {
        let mut objects = Vec::new();

        for (key, value) in self.journal.iter() {
            let (JournalKey::Account(address), JournalValue::Object(state_object)) = (key, value) else {
                continue;
            };

            let mut object = Object {
                address: *address,
                nonce: state_object.account.nonce,
                balance: state_object.account.balance,
                code_hash: state_object.account.code_hash,
                storage_root: state_object.account.storage_root,
                dirty_code: state_object.dirty_code,
                code: state_object.code.clone(),
                deleted: state_object.deleted,
                storage: Vec::new(),
            };

            if not(state_object.deleted) {
                for (index, slot) in state_object.slot_overlay.iter() {
                    object.storage.push(match slot {
                        None => StorageObject {
                            key: *index,
                            value: SlotValue::ZERO,
                            deleted: true,
                        },
                        Some(value) => StorageObject {
                            key: *index,
                            value: *value,
                            deleted: false,
                        },
                    });
                }
            }

            objects.push(object);
        }

        objects
    }
}
