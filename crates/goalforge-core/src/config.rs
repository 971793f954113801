//! Configuration loading and typed config structures for GoalForge.
//!
//! The configuration lives in a YAML file (`goalforge.yaml` by default).
//! Every field has a default, so an empty or missing file yields a working
//! demo setup: seeded store, uniform rarities, port 5000.

use std::collections::BTreeMap;
use std::path::Path;

use goalforge_types::Rarity;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidOverride {
        /// The environment variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level GoalForge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GoalForgeConfig {
    /// HTTP bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// REST layer behaviour.
    #[serde(default)]
    pub api: ApiConfig,

    /// Reward minting parameters.
    #[serde(default)]
    pub rewards: RewardConfig,

    /// Domain store initialisation.
    #[serde(default)]
    pub store: StoreConfig,
}

impl GoalForgeConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides (`HOST`, `PORT`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] if `PORT` is not a port number.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.server.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. Environment overrides are
    /// not applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// Bind address of the REST server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Override host and port from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `PORT` is not a valid port.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override host and port using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `PORT` is not a valid port.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_parse| ConfigError::InvalidOverride {
                    name: "PORT",
                    value: port.clone(),
                })?;
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

/// REST layer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Artificial delay added before every `/api` request, to mimic a
    /// remote backend during demos. Zero disables it.
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

/// Relative weights used to roll a token's rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RarityWeights {
    /// Weight of [`Rarity::Common`].
    #[serde(default)]
    pub common: u32,
    /// Weight of [`Rarity::Rare`].
    #[serde(default)]
    pub rare: u32,
    /// Weight of [`Rarity::Epic`].
    #[serde(default)]
    pub epic: u32,
    /// Weight of [`Rarity::Legendary`].
    #[serde(default)]
    pub legendary: u32,
}

impl RarityWeights {
    /// Every rarity equally likely.
    pub const UNIFORM: Self = Self {
        common: 1,
        rare: 1,
        epic: 1,
        legendary: 1,
    };

    /// Scarcity-weighted table: 60 / 25 / 10 / 5.
    pub const WEIGHTED: Self = Self {
        common: 60,
        rare: 25,
        epic: 10,
        legendary: 5,
    };

    /// Weight assigned to `rarity`.
    pub const fn weight(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        Rarity::ALL
            .iter()
            .map(|r| u64::from(self.weight(*r)))
            .fold(0_u64, u64::saturating_add)
    }
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self::UNIFORM
    }
}

/// Parameters for minting reward tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewardConfig {
    /// Rarity distribution. An all-zero table falls back to uniform.
    #[serde(default)]
    pub rarity_weights: RarityWeights,

    /// Candidate image references per rarity.
    #[serde(default = "default_image_pools")]
    pub image_pools: BTreeMap<Rarity, Vec<String>>,

    /// Image used when a rarity's pool is missing or empty.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            rarity_weights: RarityWeights::default(),
            image_pools: default_image_pools(),
            fallback_image: default_fallback_image(),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Domain store initialisation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Seed for the store's random source. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Whether to load the demo dataset at startup.
    #[serde(default = "default_true")]
    pub load_seed_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed: None,
            load_seed_data: default_true(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    5000
}

const fn default_true() -> bool {
    true
}

fn default_fallback_image() -> String {
    "/nfts/common1.png".to_owned()
}

fn default_image_pools() -> BTreeMap<Rarity, Vec<String>> {
    Rarity::ALL
        .iter()
        .map(|rarity| {
            let slug = rarity.label().to_lowercase();
            let pool = (1..=2).map(|n| format!("/nfts/{slug}{n}.png")).collect();
            (*rarity, pool)
        })
        .collect()
}
