use crate::config::types::{parse_absolute_url, CollectionEntry, Config, OutputConfig, SiteConfig};
use crate::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_site_config(&config.site)?;
    validate_output_config(&config.output)?;
    validate_collections(&config.collections)?;
    Ok(())
}

/// Validates the site root
fn validate_site_config(config: &SiteConfig) -> ConfigResult<()> {
    parse_absolute_url(&config.root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site root: {}", e)))?;
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.snapshot_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "snapshot_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates collection entries
fn validate_collections(collections: &[CollectionEntry]) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for entry in collections {
        validate_collection_name(&entry.name)?;

        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Collection '{}' is defined more than once",
                entry.name
            )));
        }

        entry.listing_url()?;
    }

    Ok(())
}

/// Collection names become directory names in snapshot mode
fn validate_collection_name(name: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "Collection name cannot be empty".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "Collection name must contain only ASCII alphanumerics, '-' and '_', got '{}'",
            name
        )));
    }

    Ok(())
}
