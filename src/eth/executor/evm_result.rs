use crate::eth::evm::EvmError;
use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Gas;
use crate::eth::primitives::Log;

/// Result of applying one transaction: what the receipt is built from.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ExecutionResult {
    pub output: Bytes,
    pub gas_used: Gas,
    pub gas_left: Gas,
    pub logs: Vec<Log>,

    /// Address of the deployed contract, for creation transactions.
    pub contract_address: Option<Address>,

    /// Fault the execution ended with, if any. The transaction still
    /// consumed gas and its receipt records the failure.
    pub error: Option<EvmError>,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
