use contracts::system::auth::UserInfo;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    /// Empty means the seed embedded in the binary
    #[serde(default)]
    pub seed_path: String,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ListConfig {
    pub max_page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            max_page_size: 500,
        }
    }
}

/// Operator the desk runs as
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            display_name: None,
            is_admin: true,
        }
    }
}

impl AuthConfig {
    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[data]
seed_path = ""

[list]
max_page_size = 500

[auth]
username = "admin"
is_admin = true
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return Ok(toml::from_str(&contents)?);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

/// Install the loaded configuration for the rest of the process
pub fn install(config: Config) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already installed, keeping the first one");
    }
}

/// Installed configuration, or defaults before `install` runs
pub fn current() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Seed file path from configuration, `None` for the embedded seed.
/// Relative paths resolve against the executable directory.
pub fn get_seed_path(config: &Config) -> Option<PathBuf> {
    let raw = config.data.seed_path.trim();
    if raw.is_empty() {
        return None;
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        return Some(path.to_path_buf());
    }
    Some(match exe_dir() {
        Some(dir) => dir.join(path),
        None => PathBuf::from(raw),
    })
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.list.max_page_size, 500);
        assert!(config.auth.is_admin);
        assert!(get_seed_path(&config).is_none());
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[server]\nhost = \"127.0.0.1\"\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.list.max_page_size, 500);
        assert_eq!(config.auth.username, "admin");
    }

    #[test]
    fn test_seed_path_resolution() {
        let mut config = Config::default();
        config.data.seed_path = "/var/lib/desk/seed.json".into();
        assert_eq!(
            get_seed_path(&config),
            Some(PathBuf::from("/var/lib/desk/seed.json"))
        );

        config.data.seed_path = "data/seed.json".into();
        let resolved = get_seed_path(&config).unwrap();
        assert!(resolved.ends_with("data/seed.json"));
    }
}
