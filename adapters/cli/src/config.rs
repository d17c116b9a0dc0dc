use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

const DEFAULT_MAX_TURNS: u32 = 20;
const DEFAULT_CARRY_LIMIT: u32 = 3;
const DEFAULT_LOG_FILTER: &str = "warn";

/// Game settings read from an optional TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Number of turns before the target escapes.
    pub(crate) max_turns: u32,
    /// Items each player may carry.
    pub(crate) carry_limit: u32,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub(crate) log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            carry_limit: DEFAULT_CARRY_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl GameConfig {
    /// Loads the configuration file, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        config.validated()
    }

    /// Applies command-line overrides on top of the file settings.
    pub(crate) fn with_overrides(
        mut self,
        max_turns: Option<u32>,
        carry_limit: Option<u32>,
    ) -> Result<Self> {
        if let Some(max_turns) = max_turns {
            self.max_turns = max_turns;
        }
        if let Some(carry_limit) = carry_limit {
            self.carry_limit = carry_limit;
        }
        self.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.max_turns == 0 {
            bail!("max_turns must be positive");
        }
        if self.carry_limit == 0 {
            bail!("carry_limit must be positive");
        }
        Ok(self)
    }
}
