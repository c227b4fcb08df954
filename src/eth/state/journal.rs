use im::OrdMap;

use crate::eth::primitives::Address;
use crate::eth::primitives::Log;
use crate::eth::state::StateObject;

/// Key namespace of the journal.
///
/// Account keys sort together in ascending address order; the two sentinel
/// keys are disjoint from the address keyspace and sort after every account,
/// so they never interleave with the commit walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JournalKey {
    Account(Address),
    Logs,
    Refund,
}

/// Value stored under one journal key. Each key namespace holds exactly one
/// kind, so walks pattern-match instead of downcasting.
#[derive(Debug, Clone)]
pub enum JournalValue {
    Object(StateObject),
    Logs(Vec<Log>),
    Refund(u64),
}

/// Ordered overlay of everything a transaction touched.
///
/// Backed by a persistent map with structural sharing: `clone` is O(1) and
/// edits fork only the touched path. That is what makes publishing a journal
/// version and restoring one cheap, no matter how many entries it holds.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: OrdMap<JournalKey, JournalValue>,
}

impl Journal {
    // -------------------------------------------------------------------------
    // Accounts
    // -------------------------------------------------------------------------

    pub fn object(&self, address: Address) -> Option<&StateObject> {
        match self.entries.get(&JournalKey::Account(address)) {
            Some(JournalValue::Object(object)) => Some(object),
            _ => None,
        }
    }

    pub fn insert_object(&mut self, address: Address, object: StateObject) {
        self.entries.insert(JournalKey::Account(address), JournalValue::Object(object));
    }

    // -------------------------------------------------------------------------
    // Logs
    // -------------------------------------------------------------------------

    pub fn push_log(&mut self, log: Log) {
        let mut logs = self.take_logs();
        logs.push(log);
        self.entries.insert(JournalKey::Logs, JournalValue::Logs(logs));
    }

    /// Removes and returns the accumulated logs.
    pub fn take_logs(&mut self) -> Vec<Log> {
        match self.entries.remove(&JournalKey::Logs) {
            Some(JournalValue::Logs(logs)) => logs,
            _ => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Refund counter
    // -------------------------------------------------------------------------

    pub fn refund(&self) -> u64 {
        match self.entries.get(&JournalKey::Refund) {
            Some(JournalValue::Refund(gas)) => *gas,
            _ => 0,
        }
    }

    pub fn set_refund(&mut self, gas: u64) {
        self.entries.insert(JournalKey::Refund, JournalValue::Refund(gas));
    }

    pub fn clear_refund(&mut self) {
        self.entries.remove(&JournalKey::Refund);
    }

    // -------------------------------------------------------------------------
    // Walk
    // -------------------------------------------------------------------------

    /// Iterates every entry in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&JournalKey, &JournalValue)> {
        self.entries.iter()
    }
}
