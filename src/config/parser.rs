use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Configuration used when no file is given: the Imperial Library book archive
const BUILTIN_CONFIG: &str = r#"
[site]
root = "https://www.imperial-library.info/"

[output]
snapshot-dir = "./snapshots"

[[collection]]
name = "arena"
url = "https://www.imperial-library.info/books/arena/by-title"

[[collection]]
name = "daggerfall"
url = "https://www.imperial-library.info/books/daggerfall/by-title"

[[collection]]
name = "battlespire"
url = "https://www.imperial-library.info/books/battlespire/by-title"

[[collection]]
name = "redguard"
url = "https://www.imperial-library.info/books/redguard/by-title"

[[collection]]
name = "morrowind"
url = "https://www.imperial-library.info/books/morrowind/by-title"

[[collection]]
name = "shadowkey"
url = "https://www.imperial-library.info/books/shadowkey/by-title"

[[collection]]
name = "oblivion"
url = "https://www.imperial-library.info/books/oblivion/by-title"

[[collection]]
name = "skyrim"
url = "https://www.imperial-library.info/books/skyrim/by-title"

[[collection]]
name = "online"
url = "https://www.imperial-library.info/books/online/by-title"
"#;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use lorekeeper::config::load_config;
///
/// let config = load_config(Path::new("lorekeeper.toml")).unwrap();
/// println!("Site root: {}", config.site.root);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

impl Config {
    /// The built-in Imperial Library configuration
    pub fn builtin() -> ConfigResult<Config> {
        parse_config(BUILTIN_CONFIG)
    }
}
