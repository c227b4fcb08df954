/// Faults raised by the interpreter or by the call-frame machinery around it.
///
/// Any of these aborts the frame that raised it and reverts that frame's
/// state changes; gas consumption depends on the fault (a revert keeps the
/// remaining gas, the others have burned it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum EvmError {
    #[error("out of gas")]
    OutOfGas,

    #[error("stack overflow")]
    StackOverflow,

    #[error("stack underflow")]
    StackUnderflow,

    #[error("not enough funds")]
    NotEnoughFunds,

    #[error("insufficient balance for transfer")]
    InsufficientBalance,

    #[error("evm: max code size exceeded")]
    MaxCodeSizeExceeded,

    #[error("contract address collision")]
    ContractAddressCollision,

    #[error("max call depth exceeded")]
    Depth,

    #[error("execution was reverted")]
    ExecutionReverted,

    #[error("contract creation code storage out of gas")]
    CodeStoreOutOfGas,
}
