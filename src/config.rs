use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::corrector::DEFAULT_MAX_LOOKAHEAD;

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8889";
pub const DEFAULT_DISTANCES: &str = "4,9";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid distances '{0}': expected comma separated numbers, eg. 4,9")]
    InvalidDistances(String),
    #[error("config file already exists")]
    Exists,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub distances: String,
    #[serde(default)]
    pub max_lookahead: usize,
    #[serde(default)]
    pub dictionaries: Vec<PathBuf>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub address: String,
    pub allowed_distances: Vec<usize>,
    pub max_lookahead: usize,
    pub dictionaries: Vec<PathBuf>,
}

impl Config {
    /// Fill in defaults for empty fields and parse the distances.
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let app = self.app;

        let distances = if app.distances.trim().is_empty() {
            DEFAULT_DISTANCES
        } else {
            app.distances.as_str()
        };

        Ok(Settings {
            address: if app.address.is_empty() {
                DEFAULT_ADDRESS.to_string()
            } else {
                app.address.clone()
            },
            allowed_distances: parse_distances(distances)?,
            max_lookahead: if app.max_lookahead == 0 {
                DEFAULT_MAX_LOOKAHEAD
            } else {
                app.max_lookahead
            },
            dictionaries: app.dictionaries,
        })
    }
}

/// Load and merge one or more config files. Later files override earlier ones.
pub fn load_all(paths: &[PathBuf]) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    for path in paths {
        log::info!("loading config: {}", path.display());
        merge(&mut config, read_file(path)?);
    }

    Ok(config)
}

/// Generate sample config file.
pub fn generate_sample(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Exists);
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Parse comma separated word length thresholds, eg. "4,9".
pub fn parse_distances(s: &str) -> Result<Vec<usize>, ConfigError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(',')
        .map(|d| {
            d.trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidDistances(s.to_string()))
        })
        .collect()
}

/// Replace the port of a `host:port` address.
pub fn with_port(address: &str, port: u16) -> String {
    match address.rsplit_once(':') {
        Some((host, _)) if !host.is_empty() => format!("{}:{}", host, port),
        _ => format!("0.0.0.0:{}", port),
    }
}

/// Load configuration from a given TOML file.
fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Merge the given src config into the dest config struct.
fn merge(dest: &mut Config, src: Config) {
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if !src.app.distances.is_empty() {
        dest.app.distances = src.app.distances;
    }
    if src.app.max_lookahead > 0 {
        dest.app.max_lookahead = src.app.max_lookahead;
    }
    if !src.app.dictionaries.is_empty() {
        dest.app.dictionaries = src.app.dictionaries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_distances() {
        assert_eq!(parse_distances("4,9").unwrap(), vec![4, 9]);
        assert_eq!(parse_distances(" 4 , 9 ,12").unwrap(), vec![4, 9, 12]);
        assert_eq!(parse_distances("100").unwrap(), vec![100]);
        assert!(parse_distances("").unwrap().is_empty());

        assert!(matches!(
            parse_distances("4,,9"),
            Err(ConfigError::InvalidDistances(_))
        ));
        assert!(parse_distances("4,x").is_err());
        assert!(parse_distances("-1").is_err());
    }

    #[test]
    fn resolves_defaults() {
        let s = Config::default().resolve().unwrap();
        assert_eq!(s.address, DEFAULT_ADDRESS);
        assert_eq!(s.allowed_distances, vec![4, 9]);
        assert_eq!(s.max_lookahead, DEFAULT_MAX_LOOKAHEAD);
        assert!(s.dictionaries.is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let cfg: Config = toml::from_str(SAMPLE_CONFIG).unwrap();
        let s = cfg.resolve().unwrap();
        assert_eq!(s.address, "0.0.0.0:8889");
        assert_eq!(s.allowed_distances, vec![4, 9]);
        assert_eq!(s.max_lookahead, 5);
    }

    #[test]
    fn merges_non_empty_fields() {
        let mut dest: Config = toml::from_str(
            r#"
            [app]
            address = "127.0.0.1:9000"
            distances = "3,8"
            dictionaries = ["a.tsv"]
            "#,
        )
        .unwrap();
        let src: Config = toml::from_str(
            r#"
            [app]
            distances = "5"
            max_lookahead = 3
            "#,
        )
        .unwrap();

        merge(&mut dest, src);
        assert_eq!(dest.app.address, "127.0.0.1:9000");
        assert_eq!(dest.app.distances, "5");
        assert_eq!(dest.app.max_lookahead, 3);
        assert_eq!(dest.app.dictionaries, vec![PathBuf::from("a.tsv")]);
    }

    #[test]
    fn replaces_ports() {
        assert_eq!(with_port("127.0.0.1:8889", 9000), "127.0.0.1:9000");
        assert_eq!(with_port("[::1]:8889", 9000), "[::1]:9000");
        assert_eq!(with_port("", 9000), "0.0.0.0:9000");
    }
}
