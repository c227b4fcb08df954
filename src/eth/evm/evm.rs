use crate::eth::evm::Contract;
use crate::eth::evm::EvmError;
use crate::eth::evm::Host;
use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Revision;

/// External EVM bytecode interpreter.
///
/// The interpreter owns nothing: every read and write goes back through the
/// [`Host`] it receives, which is how nested calls, storage metering and log
/// emission stay inside the state layer.
pub trait Evm {
    fn execute(&mut self, host: &mut dyn Host, contract: &Contract, revision: Revision) -> EvmOutput;
}

/// Outcome of one call frame.
#[derive(Debug, Clone, Default)]
pub struct EvmOutput {
    pub output: Bytes,
    pub gas_left: u64,
    pub create_address: Option<Address>,
    pub error: Option<EvmError>,
}

impl EvmOutput {
    pub fn success(output: Bytes, gas_left: u64) -> Self {
        Self {
            output,
            gas_left,
            create_address: None,
            error: None,
        }
    }

    pub fn failed(error: EvmError, gas_left: u64) -> Self {
        Self {
            output: Bytes::default(),
            gas_left,
            create_address: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
