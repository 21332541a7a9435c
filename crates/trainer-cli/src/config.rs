//! Configuration file management for trainer.
//!
//! Provides a TOML-based config file at `~/.config/trainer/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use trainer_api::{ApiClient, ApiConfig};

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: ApiSection,
    #[serde(default)]
    pub auth: AuthSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuthSection {
    /// JWT access token, written by `trainer login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the trainer config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/trainer` or `~/.config/trainer`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("trainer");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("trainer")
}

/// Return the path to the trainer config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix (it can hold the access token).
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct TrainerConfig {
    pub api_config: ApiConfig,
}

impl TrainerConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// - Base URL: `cli_api_url` > `TRAINER_API_URL` env >
    ///   `config_file.api.base_url` > `ApiConfig::DEFAULT_URL`
    /// - Access token: `TRAINER_ACCESS_TOKEN` env >
    ///   `config_file.auth.access_token` > none (login-required calls then
    ///   fail with a pointer to `trainer login`)
    pub fn resolve(cli_api_url: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let base_url = if let Some(url) = cli_api_url {
            url.to_string()
        } else if let Ok(url) = std::env::var("TRAINER_API_URL") {
            url
        } else if let Some(ref cfg) = file_config {
            cfg.api.base_url.clone()
        } else {
            ApiConfig::DEFAULT_URL.to_string()
        };

        let access_token = if let Ok(token) = std::env::var("TRAINER_ACCESS_TOKEN") {
            Some(token)
        } else {
            file_config.and_then(|cfg| cfg.auth.access_token)
        };

        let mut api_config = ApiConfig::new(base_url);
        api_config.access_token = access_token;

        Ok(Self { api_config })
    }
}

// -----------------------------------------------------------------------
// Commands
// -----------------------------------------------------------------------

/// Execute the `trainer init` command: write config file.
pub fn cmd_init(api_url: &str, force: bool) -> Result<()> {
    let path = config_path();

    if path.exists() && !force {
        bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = ConfigFile {
        api: ApiSection {
            base_url: api_url.to_string(),
        },
        auth: AuthSection::default(),
    };

    save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  api.base_url = {api_url}");
    println!();
    println!("Next: run `trainer login <username>` to store an access token.");

    Ok(())
}

/// Execute the `trainer login` command: exchange credentials for a token
/// and persist it in the config file.
pub async fn cmd_login(client: &ApiClient, username: &str, password: Option<&str>) -> Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => prompt_password()?,
    };

    let tokens = client
        .login(username, &password)
        .await
        .context("login failed")?;

    // Keep whatever base URL the user configured; only the token changes.
    let mut cfg = load_config().unwrap_or_else(|_| ConfigFile {
        api: ApiSection {
            base_url: client.config().base_url.clone(),
        },
        auth: AuthSection::default(),
    });
    cfg.auth.access_token = Some(tokens.access);
    save_config(&cfg)?;

    println!("Sesion iniciada como {username}.");
    println!("Token guardado en {}", config_path().display());

    Ok(())
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("trainer");
        let path = dir.join("config.toml");

        let original = ConfigFile {
            api: ApiSection {
                base_url: "http://localhost:8000".to_string(),
            },
            auth: AuthSection {
                access_token: Some("tok-123".to_string()),
            },
        };

        std::fs::create_dir_all(&dir).unwrap();
        let contents = toml::to_string_pretty(&original).unwrap();
        std::fs::write(&path, &contents).unwrap();

        let loaded_contents = std::fs::read_to_string(&path).unwrap();
        let loaded: ConfigFile = toml::from_str(&loaded_contents).unwrap();

        assert_eq!(loaded.api.base_url, original.api.base_url);
        assert_eq!(loaded.auth.access_token, original.auth.access_token);
    }

    #[test]
    fn config_parses_without_auth_section() {
        let loaded: ConfigFile = toml::from_str("[api]\nbase_url = \"http://x\"\n").unwrap();
        assert_eq!(loaded.api.base_url, "http://x");
        assert!(loaded.auth.access_token.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn permissions_can_be_restricted() {
        use std::os::unix::fs::PermissionsExt;

        let _lock = lock_env();

        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("test.toml");
        std::fs::write(&file, "test").unwrap();

        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&file, perms).unwrap();

        let meta = std::fs::metadata(&file).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();

        unsafe { std::env::set_var("TRAINER_API_URL", "http://env:8000") };
        unsafe { std::env::set_var("TRAINER_ACCESS_TOKEN", "env-token") };

        let config = TrainerConfig::resolve(Some("http://cli:8000")).unwrap();
        assert_eq!(config.api_config.base_url, "http://cli:8000");
        assert_eq!(config.api_config.access_token.as_deref(), Some("env-token"));

        unsafe { std::env::remove_var("TRAINER_API_URL") };
        unsafe { std::env::remove_var("TRAINER_ACCESS_TOKEN") };
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();

        unsafe { std::env::set_var("TRAINER_API_URL", "http://env:8000") };

        let config = TrainerConfig::resolve(None).unwrap();
        assert_eq!(config.api_config.base_url, "http://env:8000");

        unsafe { std::env::remove_var("TRAINER_API_URL") };
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();

        unsafe { std::env::remove_var("TRAINER_API_URL") };
        unsafe { std::env::remove_var("TRAINER_ACCESS_TOKEN") };
        // Point HOME and XDG_CONFIG_HOME at a temp dir so load_config()
        // cannot find a real config file.
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_home = std::env::var("HOME").ok();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("HOME", tmp.path()) };
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        let config = TrainerConfig::resolve(None);

        // Restore env before asserting, to avoid poisoning the mutex on failure.
        match orig_home {
            Some(h) => unsafe { std::env::set_var("HOME", h) },
            None => unsafe { std::env::remove_var("HOME") },
        }
        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }

        let config = config.unwrap();
        assert_eq!(config.api_config.base_url, ApiConfig::DEFAULT_URL);
        assert!(config.api_config.access_token.is_none());
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("trainer/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
