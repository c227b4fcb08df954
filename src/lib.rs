//! Cirrus is the state-transition core of an Ethereum-compatible ledger.
//!
//! Given an immutable snapshot of committed state, a transaction message and
//! a block context, it produces a deterministic post-state and execution
//! result. The EVM bytecode interpreter and the persistent trie are external
//! collaborators: the interpreter re-enters the core through
//! [`eth::evm::Host`] and the trie consumes the ordered change list produced
//! by [`eth::state::Txn::commit`].

pub mod eth;
pub mod ext;
