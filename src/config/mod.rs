use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Where one contract's address and ABI come from.
///
/// Unset fields fall back to the values embedded in the crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Path to a compiler artifact with an `abi` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
}

/// The `contracts:` section of contracts.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractsSection {
    #[serde(default)]
    pub loan: ContractSource,
    #[serde(default)]
    pub token: ContractSource,
}

/// Layout of contracts.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractsYaml {
    #[serde(default)]
    pub contracts: ContractsSection,
}

/// Contract configuration combining contracts.yaml and environment variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractsConfig {
    pub loan: ContractSource,
    pub token: ContractSource,
}

impl ContractsConfig {
    /// Load overrides from environment variables only
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load contracts.yaml, then let environment variables override it
    pub fn from_yaml_and_env(yaml_path: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let yaml_content =
            fs::read_to_string(yaml_path).context(format!("Failed to read {}", yaml_path))?;
        let mut config = Self::from_yaml_str(&yaml_content)
            .context(format!("Failed to parse {}", yaml_path))?;

        config.apply_env()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty file is a valid "no overrides" config
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let parsed: ContractsYaml = serde_yaml::from_str(yaml)?;
        Ok(Self {
            loan: parsed.contracts.loan,
            token: parsed.contracts.token,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(address) = env_override("LOAN_CONTRACT_ADDRESS")? {
            self.loan.address = Some(address);
        }
        if let Some(address) = env_override("TOKEN_CONTRACT_ADDRESS")? {
            self.token.address = Some(address);
        }
        if let Some(path) = env_override("LOAN_ARTIFACT_PATH")? {
            self.loan.artifact = Some(PathBuf::from(path));
        }
        if let Some(path) = env_override("TOKEN_ARTIFACT_PATH")? {
            self.token.artifact = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// True when nothing overrides the embedded values
    pub fn is_embedded(&self) -> bool {
        *self == Self::default()
    }
}

/// Read a variable, treating an empty value as unset
fn env_override(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => {
            debug!("{} overridden from environment", key);
            Ok(Some(value.trim().to_string()))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{} is not valid unicode", key)),
    }
}
