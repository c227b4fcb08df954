//! EVM boundary: the host interface the state layer exposes to the
//! interpreter, and the interpreter contract the executor plugs in.

mod contract;
#[allow(clippy::module_inception)]
mod evm;
mod evm_error;
mod host;

pub use contract::CallKind;
pub use contract::Contract;
pub use evm::Evm;
pub use evm::EvmOutput;
pub use evm_error::EvmError;
pub use host::Host;
pub use host::TxContext;
