use ethereum_types::U256;

use crate::eth::primitives::Address;
use crate::eth::primitives::BlockNumber;

/// Header fields of the block a transaction executes in. This is the block
/// side of the context the EVM can query through the host interface.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BlockHeader {
    pub number: BlockNumber,
    pub coinbase: Address,
    pub timestamp: u64,
    pub gas_limit: u64,
    pub difficulty: U256,
    pub chain_id: u64,
}
