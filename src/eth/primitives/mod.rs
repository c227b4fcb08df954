//! Ethereum and EVM entities.

mod account;
mod address;
mod block_header;
mod block_number;
mod bytes;
mod gas;
mod hash;
mod log;
mod log_topic;
mod nonce;
mod revision;
mod slot;
mod storage_status;
mod wei;

pub use account::Account;
pub use address::Address;
pub use block_header::BlockHeader;
pub use block_number::BlockNumber;
pub use bytes::Bytes;
pub use gas::Gas;
pub use hash::Hash;
pub use log::Log;
pub use log_topic::LogTopic;
pub use nonce::Nonce;
pub use revision::Revision;
pub use slot::SlotIndex;
pub use slot::SlotValue;
pub use storage_status::StorageStatus;
pub use wei::Wei;
