// Contract ABIs and deployed addresses for the loan dApp

pub mod config;
pub mod contracts;
pub mod models;

pub use contracts::{
    ContractBinding, ContractRegistry, LOAN_ABI, LOAN_CONTRACT_ADDRESS,
    LOAN_CONTRACT_ADDRESS_HEX, TOKEN_ABI, TOKEN_CONTRACT_ADDRESS, TOKEN_CONTRACT_ADDRESS_HEX,
};
pub use models::Abi;
