//! Runtime configuration
//!
//! Loaded from serde defaults, then an optional TOML file, then `EHALL_*`
//! environment variables.

use crate::error::{ErrorKind, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "ehall.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Level for this crate's events unless `RUST_LOG` says otherwise
    pub log_level: String,
    /// Key the login page uses to encrypt passwords
    pub aes_key: String,
    /// Where a captcha challenge is written for the operator
    pub captcha_path: PathBuf,
    /// Catalog cache; read when present, written after a full scrape otherwise
    pub cache_path: PathBuf,
    pub page_size: u32,
    /// Record count the page count is derived from.
    ///
    /// The scrape requests `total_records / page_size + 1` pages no matter
    /// what the pages contain, so this must track the live catalog size.
    pub total_records: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            aes_key: "0725@pwdorgopenp".to_string(),
            captcha_path: PathBuf::from("captcha.jpg"),
            cache_path: PathBuf::from("courses.csv"),
            page_size: 96,
            total_records: 9936,
        }
    }
}

impl Config {
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("EHALL_"))
    }

    pub fn load(file: &Path) -> Result<Self> {
        let config: Config = Self::figment(file).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ErrorKind::InvalidArgument("page_size").into());
        }
        if self.aes_key.len() != 16 {
            return Err(ErrorKind::InvalidKey(format!(
                "expected 16 bytes, got {}",
                self.aes_key.len()
            ))
            .into());
        }
        Ok(())
    }

    /// Number of catalog pages a scrape requests.
    ///
    /// A zero `page_size` is rejected by [`Config::validate`]; here it counts as 1.
    pub fn page_count(&self) -> u32 {
        (self.total_records / self.page_size.max(1)).saturating_add(1)
    }
}
