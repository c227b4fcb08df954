use crate::eth::primitives::Nonce;

/// Pre-execution rejections. A transaction failing with one of these changed
/// no state and consumed no gas from the block pool.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("too low {account} > {transaction}")]
    NonceTooLow { account: Nonce, transaction: Nonce },

    #[error("too high {account} < {transaction}")]
    NonceTooHigh { account: Nonce, transaction: Nonce },

    #[error("insufficient balance to pay for gas")]
    InsufficientBalanceForGas,

    #[error("gas limit {gas_limit} below intrinsic gas {intrinsic}")]
    IntrinsicGasTooLow { gas_limit: u64, intrinsic: u64 },

    #[error("block gas limit reached: {required} requested, {available} available")]
    BlockGasLimitReached { available: u64, required: u64 },

    #[error("transaction requires an EVM interpreter, but none is configured")]
    EvmNotConfigured,

    #[error("unexpected error: {0:?}")]
    Unexpected(anyhow::Error),
}
