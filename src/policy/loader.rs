use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::CapPolicy;

/// Errors that can occur during policy loading.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load a withdrawal policy from a YAML file.
pub fn load_policy(path: impl AsRef<Path>) -> Result<CapPolicy, PolicyError> {
    let content = fs::read_to_string(path)?;
    let policy: CapPolicy = serde_yaml::from_str(&content)?;

    validate_policy(&policy)?;

    Ok(policy)
}

fn validate_policy(policy: &CapPolicy) -> Result<(), PolicyError> {
    if policy.version.is_empty() {
        return Err(PolicyError::Validation(
            "Policy version cannot be empty".to_string(),
        ));
    }

    if policy.cap_per_tx <= Decimal::ZERO {
        return Err(PolicyError::Validation(format!(
            "Per-transaction cap must be positive, got {}",
            policy.cap_per_tx
        )));
    }

    Ok(())
}
