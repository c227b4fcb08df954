use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Gas;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::Wei;

/// Transaction message handed to the transition layer. Usually produced from
/// a signed transaction after signature recovery, which happens outside this
/// crate.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EvmInput {
    /// Transaction signer.
    pub from: Address,

    /// Call target. `None` deploys a contract.
    pub to: Option<Address>,

    /// Native token amount transferred to the target.
    pub value: Wei,

    /// Function call data or contract init code.
    pub data: Bytes,

    pub nonce: Nonce,
    pub gas_limit: Gas,
    pub gas_price: Wei,
}
