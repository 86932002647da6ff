use crate::display::OutputFormat;
use crate::error::{ConfigError, StorageError};
use crate::utils::validation::{strip_trailing_slash, validate_url};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_URL: &str = "DOCMOST_URL";
pub const ENV_TOKEN: &str = "DOCMOST_TOKEN";
pub const ENV_FORMAT: &str = "DOCMOST_FORMAT";
pub const ENV_SPACE: &str = "DOCMOST_SPACE";

/// Directory under the platform config dir holding config and credential.
pub const PROFILE_DIR: &str = "docmost";
const CONFIG_FILE: &str = "config.toml";

/// Contents of the config file. Unknown keys are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    pub url: Option<String>,
    pub default_format: Option<OutputFormat>,
    pub default_space: Option<String>,
}

impl FileConfig {
    /// Load the config file. A missing file is an empty config; unreadable
    /// or unparsable content is fatal.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> super::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let content = toml::to_string(self).map_err(|err| StorageError::ConfigSaveFailed {
            message: err.to_string(),
        })?;

        fs::write(path, content).map_err(|source| StorageError::FileIo {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn default_path() -> super::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join(PROFILE_DIR).join(CONFIG_FILE))
    }
}

/// Snapshot of the recognized environment variables, captured once so
/// resolution stays a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    pub url: Option<String>,
    pub token: Option<String>,
    pub format: Option<String>,
    pub space: Option<String>,
}

impl EnvVars {
    pub fn capture() -> Self {
        Self {
            url: read_env(ENV_URL),
            token: read_env(ENV_TOKEN),
            format: read_env(ENV_FORMAT),
            space: read_env(ENV_SPACE),
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Values supplied as explicit CLI flags, the highest-precedence source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub format: Option<OutputFormat>,
    pub token: Option<String>,
}

/// The one configuration value the rest of the program reads. Built once per
/// invocation, never mutated.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub default_format: OutputFormat,
    pub default_space: Option<String>,
}

/// Merge flags, environment, config file, and stored credential into the
/// effective configuration. Precedence per field: flag > env > file >
/// default. The token chain is flag > env > credential store > absent.
pub fn resolve(
    overrides: &ConfigOverrides,
    env: &EnvVars,
    file: &FileConfig,
    stored_token: Option<String>,
) -> Result<EffectiveConfig, ConfigError> {
    let (url, url_source) = if let Some(url) = &overrides.url {
        (url.clone(), "--url flag")
    } else if let Some(url) = &env.url {
        (url.clone(), "environment")
    } else if let Some(url) = &file.url {
        (url.clone(), "config file")
    } else {
        return Err(ConfigError::MissingUrl);
    };
    debug!("API URL from {}", url_source);

    validate_url(&url)?;
    let api_url = strip_trailing_slash(&url).to_string();

    let default_format = match overrides.format {
        Some(format) => format,
        None => match &env.format {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidValue {
                field: ENV_FORMAT.to_string(),
                value: raw.clone(),
                reason,
            })?,
            None => file.default_format.unwrap_or_default(),
        },
    };

    let token = if let Some(token) = &overrides.token {
        debug!("token from --token flag");
        Some(token.clone())
    } else if let Some(token) = &env.token {
        debug!("token from environment");
        Some(token.clone())
    } else if let Some(token) = stored_token {
        debug!("token from credential store");
        Some(token)
    } else {
        debug!("no token from any source");
        None
    };

    let default_space = env.space.clone().or_else(|| file.default_space.clone());

    Ok(EffectiveConfig {
        api_url,
        token,
        default_format,
        default_space,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn file_with_url(url: &str) -> FileConfig {
        FileConfig {
            url: Some(url.to_string()),
            ..FileConfig::default()
        }
    }

    #[test]
    fn test_file_config_load_save_round_trip() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        let config = FileConfig {
            url: Some("https://docs.example.com/api".to_string()),
            default_format: Some(OutputFormat::Json),
            default_space: Some("eng".to_string()),
        };

        config
            .save(&config_path)
            .expect("Failed to save config");
        let loaded = FileConfig::load(&config_path).expect("Failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_file_config_load_missing_is_default() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let loaded = FileConfig::load(&temp_dir.path().join("absent.toml"))
            .expect("Missing file should load as default");
        assert_eq!(loaded, FileConfig::default());
    }

    #[test]
    fn test_file_config_load_malformed_is_fatal() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "url = [not toml").expect("Failed to write file");

        let result = FileConfig::load(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_file_config_ignores_unknown_keys() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "url = \"https://docs.example.com\"\neditor = \"vim\"\n",
        )
        .expect("Failed to write file");

        let loaded = FileConfig::load(&config_path).expect("Unknown keys should be ignored");
        assert_eq!(loaded.url.as_deref(), Some("https://docs.example.com"));
    }

    #[test]
    fn test_resolve_url_precedence_flag_over_env_over_file() {
        let overrides = ConfigOverrides {
            url: Some("https://flag.example.com".to_string()),
            ..ConfigOverrides::default()
        };
        let env = EnvVars {
            url: Some("https://env.example.com".to_string()),
            ..EnvVars::default()
        };
        let file = file_with_url("https://file.example.com");

        let config = resolve(&overrides, &env, &file, None).unwrap();
        assert_eq!(config.api_url, "https://flag.example.com");

        let config = resolve(&ConfigOverrides::default(), &env, &file, None).unwrap();
        assert_eq!(config.api_url, "https://env.example.com");

        let config = resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, None).unwrap();
        assert_eq!(config.api_url, "https://file.example.com");
    }

    #[test]
    fn test_resolve_format_precedence_independent_of_url_source() {
        // URL from the file while the format comes from higher sources.
        let file = FileConfig {
            url: Some("https://file.example.com".to_string()),
            default_format: Some(OutputFormat::Plain),
            default_space: None,
        };

        let overrides = ConfigOverrides {
            format: Some(OutputFormat::Json),
            ..ConfigOverrides::default()
        };
        let env = EnvVars {
            format: Some("table".to_string()),
            ..EnvVars::default()
        };

        let config = resolve(&overrides, &env, &file, None).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);

        let config = resolve(&ConfigOverrides::default(), &env, &file, None).unwrap();
        assert_eq!(config.default_format, OutputFormat::Table);

        let config = resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, None).unwrap();
        assert_eq!(config.default_format, OutputFormat::Plain);
    }

    #[test]
    fn test_resolve_format_defaults_to_table() {
        let file = file_with_url("https://docs.example.com");
        let config = resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, None).unwrap();
        assert_eq!(config.default_format, OutputFormat::Table);
    }

    #[test]
    fn test_resolve_invalid_env_format_is_fatal() {
        let file = file_with_url("https://docs.example.com");
        let env = EnvVars {
            format: Some("yaml".to_string()),
            ..EnvVars::default()
        };

        let result = resolve(&ConfigOverrides::default(), &env, &file, None);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_resolve_flag_format_shadows_invalid_env_format() {
        let file = file_with_url("https://docs.example.com");
        let env = EnvVars {
            format: Some("yaml".to_string()),
            ..EnvVars::default()
        };
        let overrides = ConfigOverrides {
            format: Some(OutputFormat::Plain),
            ..ConfigOverrides::default()
        };

        let config = resolve(&overrides, &env, &file, None).unwrap();
        assert_eq!(config.default_format, OutputFormat::Plain);
    }

    #[test]
    fn test_resolve_token_precedence_flag_env_store() {
        let file = file_with_url("https://docs.example.com");
        let overrides = ConfigOverrides {
            token: Some("flag-token".to_string()),
            ..ConfigOverrides::default()
        };
        let env = EnvVars {
            token: Some("env-token".to_string()),
            ..EnvVars::default()
        };
        let stored = Some("stored-token".to_string());

        let config = resolve(&overrides, &env, &file, stored.clone()).unwrap();
        assert_eq!(config.token.as_deref(), Some("flag-token"));

        let config = resolve(&ConfigOverrides::default(), &env, &file, stored.clone()).unwrap();
        assert_eq!(config.token.as_deref(), Some("env-token"));

        let config =
            resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, stored).unwrap();
        assert_eq!(config.token.as_deref(), Some("stored-token"));

        let config = resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, None).unwrap();
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_resolve_missing_url_everywhere_is_fatal() {
        // Config file present but without a url key: still fatal.
        let file = FileConfig {
            default_format: Some(OutputFormat::Json),
            ..FileConfig::default()
        };
        let result = resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, None);
        assert!(matches!(result, Err(ConfigError::MissingUrl)));
    }

    #[test]
    fn test_resolve_strips_single_trailing_slash() {
        let file = file_with_url("https://docs.example.com/api/");
        let config = resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, None).unwrap();
        assert_eq!(config.api_url, "https://docs.example.com/api");
    }

    #[test]
    fn test_resolve_rejects_relative_url() {
        let file = file_with_url("docs.example.com");
        let result = resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, None);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_resolve_default_space_env_over_file() {
        let file = FileConfig {
            url: Some("https://docs.example.com".to_string()),
            default_format: None,
            default_space: Some("file-space".to_string()),
        };
        let env = EnvVars {
            space: Some("env-space".to_string()),
            ..EnvVars::default()
        };

        let config = resolve(&ConfigOverrides::default(), &env, &file, None).unwrap();
        assert_eq!(config.default_space.as_deref(), Some("env-space"));

        let config = resolve(&ConfigOverrides::default(), &EnvVars::default(), &file, None).unwrap();
        assert_eq!(config.default_space.as_deref(), Some("file-space"));
    }
}
