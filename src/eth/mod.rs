pub mod evm;
pub mod executor;
pub mod primitives;
pub mod state;
