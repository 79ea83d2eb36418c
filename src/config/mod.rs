use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::currency::NegativeStyle;
use crate::errors::{ChipError, ChipResult};

const DEFAULT_DIR_NAME: &str = ".budget_chips";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// How committed entries react when a chip sharing their id is amended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkPolicy {
    /// Entries hold copies that share ids with staged chips; amendments are
    /// written through and the entry totals recomputed.
    #[default]
    LiveLinked,
    /// Entries are frozen snapshots; later amendments never reach them.
    Snapshot,
}

/// Widget preferences. Ledger contents are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub negative_style: NegativeStyle,
    #[serde(default = "Config::default_display_max_chars")]
    pub display_max_chars: usize,
    #[serde(default = "Config::default_exponent_digits")]
    pub exponent_digits: usize,
    #[serde(default)]
    pub link_policy: LinkPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            negative_style: NegativeStyle::default(),
            display_max_chars: Self::default_display_max_chars(),
            exponent_digits: Self::default_exponent_digits(),
            link_policy: LinkPolicy::default(),
        }
    }
}

impl Config {
    fn default_currency_symbol() -> String {
        "$".into()
    }

    fn default_display_max_chars() -> usize {
        9
    }

    fn default_exponent_digits() -> usize {
        3
    }

    fn validate(self) -> ChipResult<Self> {
        if self.display_max_chars == 0 {
            return Err(ChipError::Config(
                "display_max_chars must be at least 1".into(),
            ));
        }
        Ok(self)
    }
}

/// Returns the application data directory, defaulting to `~/.budget_chips`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BUDGET_CHIPS_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Loads and saves [`Config`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager rooted at [`app_data_dir`].
    pub fn from_default_location() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self::new(base.join(CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing files yield the defaults.
    pub fn load(&self) -> ChipResult<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config =
            serde_json::from_str(&data).map_err(|err| ChipError::Config(err.to_string()))?;
        config.validate()
    }

    pub fn save(&self, config: &Config) -> ChipResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ChipError::Config(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "saved config");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> ChipResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
