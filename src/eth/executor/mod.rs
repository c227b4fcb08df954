//! Executor: applies transaction messages to the state layer.

mod evm_input;
mod evm_result;
mod gas_pool;
mod transition;
mod transition_error;

pub use evm_input::EvmInput;
pub use evm_result::ExecutionResult;
pub use gas_pool::GasPool;
pub use transition::Transition;
pub use transition::MAX_CALL_DEPTH;
pub use transition_error::TransitionError;
