use anyhow::{Context, Result};
use loan_contracts::config::ContractsConfig;
use loan_contracts::contracts::ContractRegistry;
use loan_contracts::models::{checksum_status, ChecksumStatus};
use loan_contracts::{LOAN_CONTRACT_ADDRESS_HEX, TOKEN_CONTRACT_ADDRESS_HEX};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean JSON
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_contracts=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Load configuration (try contracts.yaml first, fallback to env)
    let yaml_path =
        std::env::var("CONTRACTS_CONFIG").unwrap_or_else(|_| "contracts.yaml".to_string());
    let config = if Path::new(&yaml_path).exists() {
        info!("📋 Loading contract configuration from {}", yaml_path);
        ContractsConfig::from_yaml_and_env(&yaml_path)?
    } else {
        ContractsConfig::from_env()?
    };

    if config.is_embedded() {
        info!("📦 Using embedded contract addresses and ABIs");
        for literal in [LOAN_CONTRACT_ADDRESS_HEX, TOKEN_CONTRACT_ADDRESS_HEX] {
            if checksum_status(literal) == ChecksumStatus::Invalid {
                warn!("⚠️  Embedded address {} fails its EIP-55 checksum", literal);
            }
        }
    }

    let registry = ContractRegistry::from_config(&config)?;
    for binding in registry.bindings() {
        info!(
            "   - {} at {} ({} functions, {} events)",
            binding.name,
            binding.address,
            binding.abi.functions().count(),
            binding.abi.events().count()
        );
    }

    let output = serde_json::to_string_pretty(&registry.summaries())
        .context("Failed to serialize contract summary")?;
    println!("{}", output);

    Ok(())
}
