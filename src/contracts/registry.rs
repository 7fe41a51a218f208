use super::{LOAN_ABI, LOAN_CONTRACT_ADDRESS, TOKEN_ABI, TOKEN_CONTRACT_ADDRESS};
use crate::config::{ContractSource, ContractsConfig};
use crate::models::{checksum_status, Abi, ChecksumStatus};
use alloy::primitives::Address;
use anyhow::{Context, Result};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// An address paired with the ABI of the contract deployed there.
///
/// The pairing is by convention only; nothing checks the ABI against
/// the deployed bytecode.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractBinding {
    pub name: &'static str,
    pub address: Address,
    pub abi: Arc<Abi>,
}

impl ContractBinding {
    pub fn new(name: &'static str, address: Address, abi: Arc<Abi>) -> Self {
        Self { name, address, abi }
    }

    /// Function and event names with their selectors, in artifact order
    pub fn summary(&self) -> ContractSummary {
        let checksummed = self.address.to_checksum(None);

        let functions = self
            .abi
            .functions()
            .filter_map(|entry| entry.name())
            .map(|name| SelectorSummary {
                name: name.to_string(),
                selector: self
                    .abi
                    .function_selector(name)
                    .map(|selector| format!("0x{}", hex::encode(selector))),
            })
            .collect();

        let events = self
            .abi
            .events()
            .filter_map(|entry| entry.name())
            .map(|name| SelectorSummary {
                name: name.to_string(),
                selector: self
                    .abi
                    .event_topic(name)
                    .map(|topic| format!("0x{}", hex::encode(topic))),
            })
            .collect();

        ContractSummary {
            name: self.name.to_string(),
            contract_name: self.abi.contract_name().map(str::to_string),
            address: checksummed,
            abi_entries: self.abi.len(),
            functions,
            events,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorSummary {
    pub name: String,
    pub selector: Option<String>,
}

/// Serializable view of a binding, printed by the binary
#[derive(Debug, Clone, Serialize)]
pub struct ContractSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    pub address: String,
    pub abi_entries: usize,
    pub functions: Vec<SelectorSummary>,
    pub events: Vec<SelectorSummary>,
}

/// The loan and token bindings, resolved once and shared read-only
#[derive(Debug, Clone, PartialEq)]
pub struct ContractRegistry {
    loan: ContractBinding,
    token: ContractBinding,
}

impl ContractRegistry {
    /// Registry over the values compiled into the crate
    pub fn embedded() -> Self {
        Self {
            loan: ContractBinding::new("loan", LOAN_CONTRACT_ADDRESS, Arc::new(LOAN_ABI.clone())),
            token: ContractBinding::new(
                "token",
                TOKEN_CONTRACT_ADDRESS,
                Arc::new(TOKEN_ABI.clone()),
            ),
        }
    }

    /// Resolve each contract from its configured source, falling back to
    /// the embedded address and ABI for anything left unset
    pub fn from_config(config: &ContractsConfig) -> Result<Self> {
        let loan = resolve("loan", &config.loan, LOAN_CONTRACT_ADDRESS, &LOAN_ABI)?;
        let token = resolve("token", &config.token, TOKEN_CONTRACT_ADDRESS, &TOKEN_ABI)?;

        Ok(Self { loan, token })
    }

    pub fn loan(&self) -> &ContractBinding {
        &self.loan
    }

    pub fn token(&self) -> &ContractBinding {
        &self.token
    }

    /// Look a binding up by name, case-insensitively
    pub fn get(&self, name: &str) -> Option<&ContractBinding> {
        self.bindings()
            .into_iter()
            .find(|binding| binding.name.eq_ignore_ascii_case(name))
    }

    pub fn bindings(&self) -> [&ContractBinding; 2] {
        [&self.loan, &self.token]
    }

    pub fn summaries(&self) -> Vec<ContractSummary> {
        self.bindings()
            .into_iter()
            .map(ContractBinding::summary)
            .collect()
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::embedded()
    }
}

fn resolve(
    name: &'static str,
    source: &ContractSource,
    default_address: Address,
    default_abi: &Abi,
) -> Result<ContractBinding> {
    let address = match &source.address {
        Some(raw) => parse_address(name, raw)?,
        None => default_address,
    };

    let abi = match &source.artifact {
        Some(path) => {
            let abi = Abi::from_artifact_path(path)
                .with_context(|| format!("Failed to load {} contract ABI", name))?;
            info!(
                "📄 Loaded {} ABI from {} ({} entries)",
                name,
                path.display(),
                abi.len()
            );
            abi
        }
        None => default_abi.clone(),
    };

    info!("✅ {} contract at {}", name, address);
    Ok(ContractBinding::new(name, address, Arc::new(abi)))
}

fn parse_address(name: &str, raw: &str) -> Result<Address> {
    let address = Address::from_str(raw)
        .with_context(|| format!("Invalid {} contract address: {}", name, raw))?;

    if checksum_status(raw) == ChecksumStatus::Invalid {
        warn!(
            "⚠️  {} contract address {} fails its EIP-55 checksum, expected {}",
            name,
            raw,
            address.to_checksum(None)
        );
    }

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::TOKEN_CONTRACT_ADDRESS_HEX;
    use std::fs;
    use std::path::PathBuf;

    const MINI_TOKEN: &str = r#"{
        "contractName": "MiniToken",
        "abi": [
            {"type": "function", "name": "balanceOf", "inputs": [
                {"name": "account", "type": "address"}
            ], "outputs": [{"name": "", "type": "uint256"}], "stateMutability": "view"}
        ]
    }"#;

    #[test]
    fn test_embedded_registry() {
        let registry = ContractRegistry::embedded();
        assert_eq!(registry.loan().address, LOAN_CONTRACT_ADDRESS);
        assert_eq!(registry.token().address, TOKEN_CONTRACT_ADDRESS);
        assert_eq!(*registry.loan().abi, *LOAN_ABI);
        assert_eq!(*registry.token().abi, *TOKEN_ABI);
    }

    #[test]
    fn test_default_config_matches_embedded() {
        let registry = ContractRegistry::from_config(&ContractsConfig::default()).unwrap();
        assert_eq!(registry, ContractRegistry::embedded());
    }

    #[test]
    fn test_get_by_name() {
        let registry = ContractRegistry::default();
        assert_eq!(registry.get("loan").unwrap().name, "loan");
        assert_eq!(registry.get("TOKEN").unwrap().name, "token");
        assert!(registry.get("vault").is_none());
    }

    #[test]
    fn test_address_override() {
        let config = ContractsConfig {
            token: ContractSource {
                address: Some("0x5555555555555555555555555555555555555555".to_string()),
                artifact: None,
            },
            ..Default::default()
        };

        let registry = ContractRegistry::from_config(&config).unwrap();
        assert_eq!(registry.loan().address, LOAN_CONTRACT_ADDRESS);
        assert_eq!(
            registry.token().address,
            Address::from_str("0x5555555555555555555555555555555555555555").unwrap()
        );
        assert_eq!(*registry.token().abi, *TOKEN_ABI);
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let config = ContractsConfig {
            loan: ContractSource {
                address: Some("0x1234".to_string()),
                artifact: None,
            },
            ..Default::default()
        };

        let err = ContractRegistry::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid loan contract address"));
    }

    #[test]
    fn test_bad_checksum_only_warns() {
        let address = parse_address("token", "0xd8dA6BF26964af9D7eEd9e03E53415D37aA96045").unwrap();
        assert_eq!(
            address,
            Address::from_str("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap()
        );
    }

    #[test]
    fn test_artifact_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MiniToken.json");
        fs::write(&path, MINI_TOKEN).unwrap();

        let config = ContractsConfig {
            token: ContractSource {
                address: None,
                artifact: Some(path),
            },
            ..Default::default()
        };

        let registry = ContractRegistry::from_config(&config).unwrap();
        assert_eq!(registry.token().abi.contract_name(), Some("MiniToken"));
        assert_eq!(registry.token().abi.len(), 1);
        assert_eq!(registry.token().address, TOKEN_CONTRACT_ADDRESS);
    }

    #[test]
    fn test_missing_artifact_is_a_load_error() {
        let config = ContractsConfig {
            loan: ContractSource {
                address: None,
                artifact: Some(PathBuf::from("/nonexistent/Loan.json")),
            },
            ..Default::default()
        };

        let err = ContractRegistry::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to load loan contract ABI"));
        assert!(format!("{:#}", err).contains("Failed to read"));
    }

    #[test]
    fn test_summary_lists_selectors_in_order() {
        let registry = ContractRegistry::embedded();
        let summary = registry.token().summary();

        assert_eq!(summary.name, "token");
        assert_eq!(summary.contract_name.as_deref(), Some("Token"));
        assert_eq!(
            summary.address.to_lowercase(),
            TOKEN_CONTRACT_ADDRESS_HEX.to_lowercase()
        );
        assert_eq!(summary.functions[0].name, "allowance");

        let transfer = summary
            .functions
            .iter()
            .find(|f| f.name == "transfer")
            .unwrap();
        assert_eq!(transfer.selector.as_deref(), Some("0xa9059cbb"));

        let events: Vec<&str> = summary.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(events, vec!["Approval", "Transfer"]);
    }
}
