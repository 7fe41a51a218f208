use alloy::primitives::Address;
use serde::Serialize;

/// How a hex address literal relates to its EIP-55 checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumStatus {
    /// Mixed case that matches the checksum
    Valid,
    /// Mixed case that does not match, usually a typo
    Invalid,
    /// Single-case spelling, carries no checksum
    Unchecksummed,
}

/// Classify an address literal without rejecting it
pub fn checksum_status(s: &str) -> ChecksumStatus {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());

    if !(has_lower && has_upper) {
        return ChecksumStatus::Unchecksummed;
    }

    match Address::parse_checksummed(s, None) {
        Ok(_) => ChecksumStatus::Valid,
        Err(_) => ChecksumStatus::Invalid,
    }
}
