use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

/// Full run configuration, loaded from a `tandem.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,

    #[serde(flatten)]
    pub run: RunConfig,

    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default, rename = "case")]
    pub cases: Vec<crate::running::TestCase>,
}

/// Everything the execution engine needs; immutable for the duration of a
/// run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    pub server: ProgramConfig,
    pub client: ProgramConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgramConfig {
    pub executable: PathBuf,

    /// Base arguments, whitespace-separated; per-case arguments are appended.
    #[serde(default)]
    pub args: String,

    pub workdir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoringConfig {
    /// Exact line the server prints once it has finished setting up.
    pub confirmation_line: String,

    /// Score line template with a single `#` placeholder (see
    /// [`crate::scoring::extract_score`]).
    pub score_pattern: String,

    /// Per-case monitoring limit. Unset means wait forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Process names killed before a run to clear out strays from earlier runs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub kill: Vec<String>,
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "tandem.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        std::str::from_utf8(file.data.as_ref()).unwrap().to_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = std::fs::read_to_string(&filepath)
            .with_context(|| format!("Cannot read config file {:?}", filepath))?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file in ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let cur_dir = cur_dir.as_ref();
        cur_dir
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| {
                format!(
                    "Not in a tandem bench dir: Cannot find '{}'",
                    Self::FILENAME
                )
            })
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_filepath = Config::find_file_in_ancestors(cur_dir)?;
        Self::from_toml_file(config_filepath)
    }
}

impl ScoringConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
