//! Application configuration, read from a TOML file in the platform config
//! directory.

pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

use serde::Deserialize;

use crate::config::keybindings::KeybindingsConfig;

pub use loader::load;
pub use resolver::{GlobalAction, KeyResolver, NavAction, SearchAction};

/// Connection settings for the TMDB API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub base_url: String,
    /// API read access token, sent as a bearer token. Usually supplied via
    /// the `TMDB_API_TOKEN` environment variable instead.
    pub api_token: String,
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_token: String::new(),
            language: "en-US".to_string(),
        }
    }
}

/// Search input behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// How long the input must stay unchanged before a fetch is dispatched.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 600 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

/// Appwrite connection for the search-popularity counter. Optional; without
/// it searches are simply not recorded.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageConfig {
    #[serde(default = "default_usage_endpoint")]
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub collection_id: String,
}

fn default_usage_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    #[serde(default)]
    pub usage: Option<UsageConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.search.debounce_ms, 600);
        assert_eq!(config.theme.name, "Catppuccin Mocha");
        assert!(config.usage.is_none());
    }

    #[test]
    fn partial_config_overrides_only_named_values() {
        let config: AppConfig = toml::from_str(
            r#"
            [search]
            debounce_ms = 250

            [tmdb]
            api_token = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.tmdb.api_token, "abc");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn keybindings_parse_from_strings_and_lists() {
        let config: AppConfig = toml::from_str(
            r#"
            [keybindings.global]
            quit = "ctrl+q"
            reload = "F5"

            [keybindings.navigation]
            up = ["k", "up"]
            down = ["j", "down"]
            page_up = "pgup"
            page_down = "pgdn"
            home = "home"
            end = "end"

            [keybindings.search]
            focus = "/"
            exit = "esc"
            "#,
        )
        .unwrap();

        let quit = &config.keybindings.global.quit;
        assert!(quit.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!quit.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert_eq!(config.keybindings.navigation.up.display(), "k/Up");
    }

    #[test]
    fn usage_section_defaults_its_endpoint() {
        let config: AppConfig = toml::from_str(
            r#"
            [usage]
            project_id = "p"
            api_key = "k"
            database_id = "db"
            collection_id = "metrics"
            "#,
        )
        .unwrap();

        let usage = config.usage.unwrap();
        assert_eq!(usage.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(usage.collection_id, "metrics");
    }
}
