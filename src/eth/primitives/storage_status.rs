/// Effect of a storage write, as reported back to the EVM for gas metering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, serde::Serialize, serde::Deserialize)]
pub enum StorageStatus {
    /// Slot already held the assigned value; nothing was written.
    Unchanged,

    /// First write this transaction, over a non-zero committed value.
    Modified,

    /// First write this transaction, over a zero committed value.
    Added,

    /// First write this transaction, clearing a non-zero committed value.
    Deleted,

    /// Second or later write this transaction.
    ModifiedAgain,
}
