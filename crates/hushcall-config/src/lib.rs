use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use hushcall_core::phone::{is_known_region, normalize_region};
use hushcall_core::screening::{
    validate_repeated_count, validate_repeated_minutes, ContactedCheck, GroupCheck, MessageCheck,
    ScreeningConfig,
};
use hushcall_core::sources::SourceAccess;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "hushcall";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the network region when set.
    pub home_region: Option<String>,
    pub screening: ScreeningConfig,
    pub access: SourceAccess,
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
    #[error("invalid home_region value: {0}")]
    InvalidHomeRegion(String),
    #[error("invalid screening.repeated.minutes value: {0}")]
    InvalidRepeatedMinutes(u32),
    #[error("invalid screening.repeated.count value: {0}")]
    InvalidRepeatedCount(u32),
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

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    home_region: Option<String>,
    screening: Option<ScreeningFile>,
    permissions: Option<PermissionsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScreeningFile {
    contacted: Option<CategoryFile<ContactedCheck>>,
    groups: Option<CategoryFile<GroupCheck>>,
    repeated: Option<RepeatedFile>,
    messages: Option<CategoryFile<MessageCheck>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryFile<T> {
    enabled: Option<bool>,
    checks: Option<Vec<T>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RepeatedFile {
    enabled: Option<bool>,
    minutes: Option<u32>,
    count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PermissionsFile {
    contacts: Option<bool>,
    call_log: Option<bool>,
    messages: Option<bool>,
}

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

    if let Some(region) = parsed.home_region {
        if !is_known_region(&region) {
            return Err(ConfigError::InvalidHomeRegion(region));
        }
        config.home_region = normalize_region(&region);
    }

    if let Some(screening) = parsed.screening {
        merge_screening(&mut config.screening, screening)?;
    }

    if let Some(permissions) = parsed.permissions {
        if let Some(contacts) = permissions.contacts {
            config.access.contacts = contacts;
        }
        if let Some(call_log) = permissions.call_log {
            config.access.call_log = call_log;
        }
        if let Some(messages) = permissions.messages {
            config.access.messages = messages;
        }
    }

    Ok(config)
}

fn merge_screening(config: &mut ScreeningConfig, parsed: ScreeningFile) -> Result<()> {
    if let Some(contacted) = parsed.contacted {
        if let Some(enabled) = contacted.enabled {
            config.contacted_checked = enabled;
        }
        if let Some(checks) = contacted.checks {
            config.contacted = checks.into_iter().collect();
        }
    }

    if let Some(groups) = parsed.groups {
        if let Some(enabled) = groups.enabled {
            config.groups_checked = enabled;
        }
        if let Some(checks) = groups.checks {
            config.groups = checks.into_iter().collect();
        }
    }

    if let Some(repeated) = parsed.repeated {
        if let Some(enabled) = repeated.enabled {
            config.repeated_checked = enabled;
        }
        if let Some(minutes) = repeated.minutes {
            config.repeated_minutes = validate_repeated_minutes(minutes)
                .map_err(|_| ConfigError::InvalidRepeatedMinutes(minutes))?;
        }
        if let Some(count) = repeated.count {
            config.repeated_count = validate_repeated_count(count)
                .map_err(|_| ConfigError::InvalidRepeatedCount(count))?;
        }
    }

    if let Some(messages) = parsed.messages {
        if let Some(enabled) = messages.enabled {
            config.messages_checked = enabled;
        }
        if let Some(checks) = messages.checks {
            config.messages = checks.into_iter().collect();
        }
    }

    Ok(())
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
    use super::{
        load_at_path, merge_config, CategoryFile, ConfigError, ConfigFile, PermissionsFile,
        RepeatedFile, ScreeningFile,
    };
    use hushcall_core::screening::{ContactedCheck, GroupCheck, MessageCheck};
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
            home_region: Some("gb".to_string()),
            screening: Some(ScreeningFile {
                groups: Some(CategoryFile {
                    enabled: Some(true),
                    checks: Some(vec![GroupCheck::LocalMobile, GroupCheck::TollFree]),
                }),
                repeated: Some(RepeatedFile {
                    enabled: Some(true),
                    minutes: Some(10),
                    count: Some(2),
                }),
                ..ScreeningFile::default()
            }),
            permissions: Some(PermissionsFile {
                messages: Some(false),
                ..PermissionsFile::default()
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.home_region.as_deref(), Some("GB"));
        assert!(merged.screening.groups_checked);
        assert_eq!(
            merged.screening.groups.iter().copied().collect::<Vec<_>>(),
            vec![GroupCheck::TollFree, GroupCheck::LocalMobile]
        );
        assert!(merged.screening.repeated_checked);
        assert_eq!(merged.screening.repeated_minutes, 10);
        assert_eq!(merged.screening.repeated_count, 2);
        assert!(!merged.screening.contacted_checked);
        assert!(merged.access.contacts);
        assert!(!merged.access.messages);
    }

    #[test]
    fn merge_config_rejects_unknown_region() {
        let parsed = ConfigFile {
            home_region: Some("Atlantis".to_string()),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::InvalidHomeRegion(_)
        ));
    }

    #[test]
    fn merge_config_rejects_zero_repeated_count() {
        let parsed = ConfigFile {
            screening: Some(ScreeningFile {
                repeated: Some(RepeatedFile {
                    count: Some(0),
                    ..RepeatedFile::default()
                }),
                ..ScreeningFile::default()
            }),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::InvalidRepeatedCount(0)
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "home_region = \"us\"\n\
             [screening.contacted]\nenabled = true\nchecks = [\"message\"]\n\
             [screening.messages]\nenabled = true\nchecks = [\"text\", \"inbox\"]\n\
             [permissions]\ncall_log = false\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.home_region.as_deref(), Some("US"));
        assert!(config.screening.contacted_checked);
        assert_eq!(
            config.screening.contacted.iter().copied().collect::<Vec<_>>(),
            vec![ContactedCheck::Message]
        );
        assert_eq!(
            config.screening.messages.iter().copied().collect::<Vec<_>>(),
            vec![MessageCheck::Inbox, MessageCheck::Text]
        );
        assert!(!config.access.call_log);
    }

    #[test]
    fn load_at_path_rejects_unknown_checks() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[screening.groups]\nchecks = [\"premium\"]\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
