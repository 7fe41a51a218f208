use alloy::json_abi::JsonAbi;
use alloy::primitives::{Selector, B256};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Discriminator carried by every ABI record (the JSON `type` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiItemKind {
    // `type` may be omitted for functions
    #[default]
    Function,
    Event,
    Error,
    Constructor,
    Fallback,
    Receive,
}

impl AbiItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbiItemKind::Function => "function",
            AbiItemKind::Event => "event",
            AbiItemKind::Error => "error",
            AbiItemKind::Constructor => "constructor",
            AbiItemKind::Fallback => "fallback",
            AbiItemKind::Receive => "receive",
        }
    }
}

/// A single ABI record, kept in artifact order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiEntry {
    #[serde(rename = "type", default)]
    pub kind: AbiItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Everything else (inputs, outputs, stateMutability, ...) verbatim
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AbiEntry {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Build artifact layout produced by Hardhat/Truffle
#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(rename = "contractName")]
    contract_name: Option<String>,
    abi: Option<Value>,
}

/// Immutable ABI descriptor.
///
/// Holds the records in the order the artifact lists them, plus a typed
/// [`JsonAbi`] view of the same data for selector and signature lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Abi {
    contract_name: Option<String>,
    entries: Vec<AbiEntry>,
    typed: JsonAbi,
}

impl Abi {
    /// Parse a bare ABI array
    pub fn from_abi_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("ABI is not valid JSON")?;
        Self::from_abi_value(value, None)
    }

    /// Parse a compiler artifact and take its `abi` field
    pub fn from_artifact_str(json: &str) -> Result<Self> {
        let artifact: Artifact =
            serde_json::from_str(json).context("Artifact is not a valid JSON object")?;

        let abi = artifact.abi.ok_or_else(|| match &artifact.contract_name {
            Some(name) => anyhow!("Artifact {} has no abi field", name),
            None => anyhow!("Artifact has no abi field"),
        })?;

        Self::from_abi_value(abi, artifact.contract_name)
    }

    /// Read a compiler artifact from disk
    pub fn from_artifact_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_artifact_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn from_abi_value(value: Value, contract_name: Option<String>) -> Result<Self> {
        if !value.is_array() {
            return Err(anyhow!("ABI must be a JSON array"));
        }

        let entries: Vec<AbiEntry> =
            serde_json::from_value(value.clone()).context("Invalid ABI entry")?;
        if entries.is_empty() {
            return Err(anyhow!("ABI is empty"));
        }

        let typed: JsonAbi = serde_json::from_value(value)
            .context("ABI does not follow the Solidity JSON ABI format")?;

        Ok(Self {
            contract_name,
            entries,
            typed,
        })
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    pub fn entries(&self) -> &[AbiEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AbiEntry> {
        self.entries.iter()
    }

    /// Typed view for callers that build contract bindings
    pub fn json_abi(&self) -> &JsonAbi {
        &self.typed
    }

    pub fn functions(&self) -> impl Iterator<Item = &AbiEntry> {
        self.of_kind(AbiItemKind::Function)
    }

    pub fn events(&self) -> impl Iterator<Item = &AbiEntry> {
        self.of_kind(AbiItemKind::Event)
    }

    fn of_kind(&self, kind: AbiItemKind) -> impl Iterator<Item = &AbiEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// 4-byte selector of the first function overload with this name
    pub fn function_selector(&self, name: &str) -> Option<Selector> {
        self.typed
            .function(name)
            .and_then(|overloads| overloads.first())
            .map(|function| function.selector())
    }

    /// topic0 of the first event with this name
    pub fn event_topic(&self, name: &str) -> Option<B256> {
        self.typed
            .event(name)
            .and_then(|events| events.first())
            .map(|event| event.selector())
    }
}

impl<'a> IntoIterator for &'a Abi {
    type Item = &'a AbiEntry;
    type IntoIter = std::slice::Iter<'a, AbiEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Abi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
