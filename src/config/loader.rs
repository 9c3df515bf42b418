use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::AppConfig;

const CONFIG_DIR: &str = "reelscout";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides `tmdb.api_token` from the config file.
pub const TOKEN_ENV_VAR: &str = "TMDB_API_TOKEN";

#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|path| path.join(CONFIG_DIR))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|path| path.join(CONFIG_FILE))
}

/// Load the configuration, falling back to defaults when no file exists.
pub fn load() -> color_eyre::Result<AppConfig> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config, std::env::var(TOKEN_ENV_VAR).ok());

    if config.tmdb.api_token.is_empty() {
        warn!("No TMDB API token configured; movie fetches will fail until one is set");
    }

    Ok(config)
}

fn read_config_file() -> color_eyre::Result<AppConfig> {
    let Some(path) = config_path() else {
        debug!("No config directory on this platform, using defaults");
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// The environment takes precedence over the config file for the API token.
fn apply_env_overrides(config: &mut AppConfig, token: Option<String>) {
    if let Some(token) = token
        && !token.is_empty()
    {
        config.tmdb.api_token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_token_overrides_the_configured_one() {
        let mut config = AppConfig::default();
        config.tmdb.api_token = "from-file".to_string();

        apply_env_overrides(&mut config, Some("from-env".to_string()));

        assert_eq!(config.tmdb.api_token, "from-env");
    }

    #[test]
    fn missing_env_token_keeps_the_configured_one() {
        let mut config = AppConfig::default();
        config.tmdb.api_token = "from-file".to_string();

        apply_env_overrides(&mut config, None);

        assert_eq!(config.tmdb.api_token, "from-file");
    }

    #[test]
    fn empty_env_token_is_ignored() {
        let mut config = AppConfig::default();
        config.tmdb.api_token = "from-file".to_string();

        apply_env_overrides(&mut config, Some(String::new()));

        assert_eq!(config.tmdb.api_token, "from-file");
    }
}
