use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use oko_core::limit::RateLimits;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "oko";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "oko";
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

const DEFAULT_DEPSEARCH_URL: &str = "https://api.depsearch.digital";
const DEFAULT_OFDATA_URL: &str = "https://api.ofdata.ru/v2";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    pub limits: RateLimits,
    pub min_password_len: usize,
}

#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    pub depsearch_url: String,
    pub depsearch_token: Option<String>,
    pub ofdata_url: String,
    pub ofdata_key: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig {
                depsearch_url: DEFAULT_DEPSEARCH_URL.to_string(),
                depsearch_token: None,
                ofdata_url: DEFAULT_OFDATA_URL.to_string(),
                ofdata_key: None,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            limits: RateLimits::default(),
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid timeout_secs value: {0}")]
    InvalidTimeout(u64),
    #[error("invalid limits.{field} value: {value}")]
    InvalidLimit { field: &'static str, value: i64 },
    #[error("invalid min_password_len value: {0}")]
    InvalidMinPasswordLen(usize),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    min_password_len: Option<usize>,
    providers: Option<ProvidersFile>,
    limits: Option<LimitsFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProvidersFile {
    depsearch_url: Option<String>,
    depsearch_token: Option<String>,
    ofdata_url: Option<String>,
    ofdata_key: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsFile {
    per_minute: Option<i64>,
    per_hour: Option<i64>,
}

/// Loads the config file, falling back to defaults when no explicit path was
/// given and none exists at the default location.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    // The file may carry provider tokens.
    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(len) = parsed.min_password_len {
        if len == 0 {
            return Err(ConfigError::InvalidMinPasswordLen(len));
        }
        config.min_password_len = len;
    }

    if let Some(providers) = parsed.providers {
        if let Some(url) = providers.depsearch_url {
            config.providers.depsearch_url = url;
        }
        if let Some(token) = providers.depsearch_token {
            config.providers.depsearch_token = Some(token);
        }
        if let Some(url) = providers.ofdata_url {
            config.providers.ofdata_url = url;
        }
        if let Some(key) = providers.ofdata_key {
            config.providers.ofdata_key = Some(key);
        }
        if let Some(timeout) = providers.timeout_secs {
            if timeout == 0 {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
            config.providers.timeout_secs = timeout;
        }
        if let Some(agent) = providers.user_agent {
            config.providers.user_agent = agent;
        }
    }

    if let Some(limits) = parsed.limits {
        if let Some(per_minute) = limits.per_minute {
            if per_minute <= 0 {
                return Err(ConfigError::InvalidLimit {
                    field: "per_minute",
                    value: per_minute,
                });
            }
            config.limits.per_minute = per_minute as usize;
        }
        if let Some(per_hour) = limits.per_hour {
            if per_hour <= 0 {
                return Err(ConfigError::InvalidLimit {
                    field: "per_hour",
                    value: per_hour,
                });
            }
            config.limits.per_hour = per_hour as usize;
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigFile, LimitsFile, ProvidersFile};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            min_password_len: Some(8),
            providers: Some(ProvidersFile {
                depsearch_url: Some("https://search.example".to_string()),
                depsearch_token: Some("token".to_string()),
                ofdata_url: None,
                ofdata_key: Some("key".to_string()),
                timeout_secs: Some(5),
                user_agent: None,
            }),
            limits: Some(LimitsFile {
                per_minute: Some(2),
                per_hour: Some(20),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.min_password_len, 8);
        assert_eq!(merged.providers.depsearch_url, "https://search.example");
        assert_eq!(merged.providers.depsearch_token.as_deref(), Some("token"));
        assert_eq!(merged.providers.timeout_secs, 5);
        assert_eq!(merged.providers.user_agent, "oko");
        assert_eq!(merged.limits.per_minute, 2);
        assert_eq!(merged.limits.per_hour, 20);
    }

    #[test]
    fn merge_config_rejects_non_positive_limits() {
        let parsed = ConfigFile {
            min_password_len: None,
            providers: None,
            limits: Some(LimitsFile {
                per_minute: Some(0),
                per_hour: None,
            }),
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(err.to_string().contains("per_minute"));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "min_password_len = 10\n[providers]\ndepsearch_token = \"t\"\n[limits]\nper_minute = 3\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.min_password_len, 10);
        assert_eq!(config.providers.depsearch_token.as_deref(), Some("t"));
        assert_eq!(config.limits.per_minute, 3);
    }
}
