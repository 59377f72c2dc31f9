use std::{
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::warn;
use serde::Deserialize;
use thiserror::Error;
use tokio::{fs::read_to_string, io};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
    /// ptp4l configuration used by profiles that do not bring their own
    #[serde(default = "default_ptp4l_config")]
    pub default_ptp4l_config: PathBuf,
    /// JSON list of profiles, as written by the controller
    pub profiles: PathBuf,
    /// Directory the rendered configuration files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_loglevel() -> String {
    "info".to_owned()
}

fn default_ptp4l_config() -> PathBuf {
    PathBuf::from("/etc/ptp4l.conf")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("/var/run")
}

impl Config {
    /// Parse config from file
    pub async fn from_file(file: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let meta = std::fs::metadata(&file)?;
        let perm = meta.permissions();

        if perm.mode() as libc::mode_t & libc::S_IWOTH != 0 {
            warn!("Unrestricted config file permissions: Others can write.");
        }

        let contents = read_to_string(file).await?;
        contents.parse()
    }

    /// Check that the config is reasonable
    pub fn check(&self) -> bool {
        let mut ok = true;

        if !self.output_dir.is_dir() {
            warn!(
                "Output directory {} does not exist.",
                self.output_dir.display()
            );
            ok = false;
        }

        ok
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        Ok(toml::de::from_str(contents)?)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error while reading config: {0}")]
    Io(#[from] io::Error),
    #[error("config toml parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal() {
        let config = Config::from_str("profiles = \"/etc/linuxptp/profiles.json\"").unwrap();

        assert_eq!(config.loglevel, "info");
        assert_eq!(config.default_ptp4l_config, PathBuf::from("/etc/ptp4l.conf"));
        assert_eq!(config.profiles, PathBuf::from("/etc/linuxptp/profiles.json"));
        assert_eq!(config.output_dir, PathBuf::from("/var/run"));
    }

    #[test]
    fn full() {
        let contents = r#"
loglevel = "debug"
default-ptp4l-config = "/etc/ptp4l.conf.default"
profiles = "/tmp/profiles.json"
output-dir = "/tmp"
"#;
        let config = Config::from_str(contents).unwrap();

        assert_eq!(config.loglevel, "debug");
        assert_eq!(config.output_dir, PathBuf::from("/tmp"));
        assert!(config.check());
    }

    #[test]
    fn unknown_field() {
        let contents = "profiles = \"/tmp/p.json\"\nfoo = 1";
        assert!(matches!(
            Config::from_str(contents),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_output_dir_fails_check() {
        let contents = "profiles = \"/tmp/p.json\"\noutput-dir = \"/nonexistent/ptpconf\"";
        assert!(!Config::from_str(contents).unwrap().check());
    }

    #[tokio::test]
    async fn missing_file() {
        assert!(matches!(
            Config::from_file("/nonexistent/ptpconf.toml").await,
            Err(ConfigError::Io(_))
        ));
    }
}
