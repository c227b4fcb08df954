use im::OrdMap;

use crate::eth::primitives::Account;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;

/// Dirty record of one account inside a transaction journal.
///
/// `Clone` is the copy handed out on materialisation: account fields are
/// copied outright, while the slot overlay is persistent and shares structure
/// until an edit forks it. Older journal versions therefore keep seeing the
/// object as it was when they were published.
#[derive(Debug, Clone, Default)]
pub struct StateObject {
    pub account: Account,

    /// Slots written by this transaction. `None` is the tombstone: the slot
    /// must read as zero and be deleted at commit.
    pub slot_overlay: OrdMap<SlotIndex, Option<SlotValue>>,

    /// Raw bytecode, meaningful only while `dirty_code` is set.
    pub code: Bytes,

    pub dirty_code: bool,
    pub suicided: bool,
    pub deleted: bool,
}

impl StateObject {
    /// Object materialised from an account that exists in the backing
    /// snapshot.
    pub fn from_account(account: Account) -> Self {
        Self {
            account,
            ..Default::default()
        }
    }

    /// Checks account emptiness (EIP-161).
    pub fn is_empty(&self) -> bool {
        self.account.is_empty()
    }
}
