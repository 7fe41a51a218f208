pub mod abi;
pub mod address;

pub use abi::{Abi, AbiEntry, AbiItemKind};
pub use address::{checksum_status, ChecksumStatus};
