use crate::config::types::CollectionEntry;
use crate::{ConfigError, ConfigResult};

/// Name that selects every configured collection
pub const ALL_COLLECTIONS: &str = "all";

/// Filters the configured collections down to the requested names
///
/// An empty request, or one containing `all`, selects every collection. The
/// result keeps the configuration's order regardless of the order of `names`.
///
/// # Returns
///
/// * `Ok(Vec<&CollectionEntry>)` - The selected collections
/// * `Err(ConfigError::UnknownCollection)` - A requested name is not configured
pub fn select_collections<'a, S: AsRef<str>>(
    collections: &'a [CollectionEntry],
    names: &[S],
) -> ConfigResult<Vec<&'a CollectionEntry>> {
    let names: Vec<&str> = names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() || names.contains(&ALL_COLLECTIONS) {
        return Ok(collections.iter().collect());
    }

    if let Some(unknown) = names
        .iter()
        .find(|n| !collections.iter().any(|c| c.name == **n))
    {
        return Err(ConfigError::UnknownCollection(unknown.to_string()));
    }

    Ok(collections
        .iter()
        .filter(|c| names.contains(&c.name.as_str()))
        .collect())
}
