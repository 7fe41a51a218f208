use crate::models::Abi;
use alloy::primitives::{address, Address};
use std::sync::LazyLock;

pub mod registry;

pub use registry::{ContractBinding, ContractRegistry, ContractSummary};

// Compiler artifacts, embedded at build time
pub const LOAN_ARTIFACT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/artifacts/Loan.json"));
pub const TOKEN_ARTIFACT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/artifacts/Token.json"));

// Deployed addresses, spelled exactly as published
pub const LOAN_CONTRACT_ADDRESS_HEX: &str = "0x76B8d8dE1dD5AdC7ec137518248013DCB168Dd08";
pub const TOKEN_CONTRACT_ADDRESS_HEX: &str = "0xd72430ca142f5EA97c816d547bD4096411f0486c";

pub const LOAN_CONTRACT_ADDRESS: Address = address!("76B8d8dE1dD5AdC7ec137518248013DCB168Dd08");
pub const TOKEN_CONTRACT_ADDRESS: Address = address!("d72430ca142f5EA97c816d547bD4096411f0486c");

/// Loan contract ABI, parsed once on first access
pub static LOAN_ABI: LazyLock<Abi> = LazyLock::new(|| {
    Abi::from_artifact_str(LOAN_ARTIFACT).expect("embedded Loan artifact holds a valid ABI")
});

/// Token contract ABI, parsed once on first access
pub static TOKEN_ABI: LazyLock<Abi> = LazyLock::new(|| {
    Abi::from_artifact_str(TOKEN_ARTIFACT).expect("embedded Token artifact holds a valid ABI")
});
