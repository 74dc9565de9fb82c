//! Wiring-file loading and validation.

use crate::error::ConfigError;
use crate::types::WiringFile;
use std::path::Path;

/// Loads and validates a wiring file from disk.
pub fn load_wiring(path: &Path) -> Result<WiringFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_wiring_from_str(&content)
}

/// Parses and validates a wiring file from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_wiring_from_str(content: &str) -> Result<WiringFile, ConfigError> {
    let wiring: WiringFile =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate(&wiring)?;
    Ok(wiring)
}

/// Validates that every declaration names both of its endpoints.
fn validate(wiring: &WiringFile) -> Result<(), ConfigError> {
    for net in &wiring.nets {
        if net.expr.is_empty() {
            return Err(ConfigError::MissingField("net.expr".to_string()));
        }
        if net.target.is_empty() {
            return Err(ConfigError::MissingField("net.target".to_string()));
        }
    }
    for constant in &wiring.constants {
        if constant.pin.is_empty() {
            return Err(ConfigError::MissingField("setp.pin".to_string()));
        }
    }
    Ok(())
}
