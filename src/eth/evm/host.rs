use ethereum_types::U256;

use crate::eth::evm::CallKind;
use crate::eth::evm::Contract;
use crate::eth::evm::EvmOutput;
use crate::eth::primitives::Address;
use crate::eth::primitives::BlockNumber;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Hash;
use crate::eth::primitives::LogTopic;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::primitives::StorageStatus;
use crate::eth::primitives::Wei;

/// Transaction and block context the EVM can query.
#[derive(Debug, Clone, Default)]
pub struct TxContext {
    pub gas_price: Wei,
    pub origin: Address,
    pub coinbase: Address,
    pub block_number: BlockNumber,
    pub block_timestamp: u64,
    pub block_gas_limit: u64,
    pub difficulty: U256,
    pub chain_id: u64,
}

/// Everything the EVM interpreter needs from its environment. The state
/// layer implements this; the interpreter re-enters through it synchronously.
pub trait Host {
    fn account_exists(&self, address: Address) -> bool;

    fn get_storage(&self, address: Address, index: SlotIndex) -> SlotValue;

    fn set_storage(&mut self, address: Address, index: SlotIndex, value: SlotValue) -> StorageStatus;

    fn get_balance(&self, address: Address) -> Wei;

    fn get_code_size(&self, address: Address) -> usize;

    fn get_code_hash(&self, address: Address) -> Hash;

    fn get_code(&self, address: Address) -> Bytes;

    /// Transfers the full balance of `address` to `beneficiary`, then marks
    /// `address` as suicided.
    fn selfdestruct(&mut self, address: Address, beneficiary: Address);

    fn get_tx_context(&self) -> TxContext;

    fn get_block_hash(&self, number: BlockNumber) -> Hash;

    fn emit_log(&mut self, address: Address, topics: &[LogTopic], data: &[u8]);

    /// Runs a nested frame described by an already-built [`Contract`].
    fn call(&mut self, contract: Contract) -> EvmOutput;

    fn empty(&self, address: Address) -> bool;

    /// Runs a nested frame from its raw parts, deriving the contract address
    /// for create kinds.
    #[allow(clippy::too_many_arguments)]
    fn call_ex(
        &mut self,
        kind: CallKind,
        recipient: Address,
        sender: Address,
        value: Wei,
        input: Bytes,
        gas: u64,
        depth: usize,
        is_static: bool,
        salt: Hash,
        code_address: Address,
    ) -> EvmOutput;
}
