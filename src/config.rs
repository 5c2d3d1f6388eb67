use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "trivia.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Contents of `trivia.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TriviaConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl TriviaConfig {
    /// The config written by `trivia init`
    pub fn starter() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
        }
    }

    /// Fill unset keys from `fallback`
    pub fn or(self, fallback: TriviaConfig) -> Self {
        Self {
            database: self.database.or(fallback.database),
            host: self.host.or(fallback.host),
            port: self.port.or(fallback.port),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(self.database.as_deref().unwrap_or(DEFAULT_DATABASE))
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid host {:?}: {}", host, e))?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }
}

/// Config file used when `--config` is not given
pub fn default_config_path() -> PathBuf {
    PathBuf::from("trivia.toml")
}

/// Read a config file; a missing file is `None`
pub fn load_config(path: &Path) -> anyhow::Result<Option<TriviaConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let config: TriviaConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &TriviaConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
