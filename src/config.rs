//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional YAML
//! file, environment variables, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

use crate::http::reader::{DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_HEAD_BYTES, Limits};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4221";
pub const DEFAULT_DIRECTORY: &str = ".";

pub const ENV_LISTEN: &str = "LISTEN";
pub const ENV_DIRECTORY: &str = "COURIER_DIRECTORY";
pub const ENV_TIMEOUT_SECS: &str = "COURIER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listen_addr: String,
    /// Root of the `/files` route.
    pub directory: PathBuf,
    /// Per-connection deadline in seconds; no deadline when unset.
    pub timeout_secs: Option<u64>,
    /// Start line plus header block, terminators included.
    pub max_head_bytes: usize,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            timeout_secs: None,
            max_head_bytes: DEFAULT_MAX_HEAD_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "courier", about = "Minimal HTTP/1.1 echo and file server")]
pub struct Args {
    /// Directory to serve files from
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub listen: Option<String>,

    /// Per-connection deadline in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid configuration")
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Applies environment overrides through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_LISTEN) {
            self.listen_addr = addr;
        }
        if let Some(dir) = lookup(ENV_DIRECTORY) {
            self.directory = PathBuf::from(dir);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be an integer, got {secs:?}"))?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }

    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(dir) = &args.directory {
            self.directory = dir.clone();
        }
        if let Some(addr) = &args.listen {
            self.listen_addr = addr.clone();
        }
        if let Some(secs) = args.timeout_secs {
            self.timeout_secs = Some(secs);
        }
        self
    }

    /// Builds the effective configuration from every source.
    pub fn resolve<F>(args: &Args, env: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match &args.config {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        let cfg = base.with_env(env)?.with_args(args);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timeout_secs == Some(0) {
            bail!("timeout must be at least one second");
        }
        if self.max_head_bytes == 0 || self.max_body_bytes == 0 {
            bail!("size limits must be greater than zero");
        }
        if self.listen_addr.trim().is_empty() {
            bail!("listen address must not be empty");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_head_bytes: self.max_head_bytes,
            max_body_bytes: self.max_body_bytes,
        }
    }
}
