use std::{net::SocketAddr, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    search_query::{Interpreter, KScaling},
};

const CONFIG_FILE: &str = "config.yaml";

/// Upper end of the listings price slider when no max price is given
const DEFAULT_LISTING_MAX_PRICE: u64 = 10000;
const DEFAULT_WEB_ADDR: &str = "0.0.0.0:8080";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_listing_max_price")]
    pub max_price: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_LISTING_MAX_PRICE,
        }
    }
}

fn default_listing_max_price() -> u64 {
    DEFAULT_LISTING_MAX_PRICE
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_web_addr")]
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_WEB_ADDR.to_string(),
        }
    }
}

fn default_web_addr() -> String {
    DEFAULT_WEB_ADDR.to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How the "k" price shorthand is detected
    #[serde(default)]
    pub k_scaling: KScaling,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub web: WebConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        if self.listing.max_price == 0 {
            return Err(AppError::invalid_config(
                "listing.max_price",
                "must be greater than 0",
            ));
        }

        if self.web.addr.parse::<SocketAddr>().is_err() {
            return Err(AppError::invalid_config(
                "web.addr",
                format!("'{}' is not a socket address", self.web.addr),
            ));
        }

        Ok(())
    }

    /// Load `config.yaml` from `base_path`, creating it with defaults when
    /// missing. The file is rewritten when new keys were filled in.
    pub fn load_with(base_path: impl Into<PathBuf>) -> AppResult<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;

        let path = base_path.join(CONFIG_FILE);

        // create new if does not exist
        if !path.exists() {
            log::info!("creating default config at {}", path.display());
            std::fs::write(&path, serde_yml::to_string(&Self::default())?)?;
        }

        let config_str = std::fs::read_to_string(&path)?;
        let mut config: Self = serde_yml::from_str(&config_str)?;
        config.base_path = base_path;

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> AppResult<()> {
        let config_str = serde_yml::to_string(&self)?;
        std::fs::write(self.base_path.join(CONFIG_FILE), config_str)?;
        Ok(())
    }

    pub fn interpreter(&self) -> Interpreter {
        Interpreter::new(self.k_scaling)
    }

    /// `EVENTSEEK_BASE_PATH`, else `~/.local/share/eventseek`.
    pub fn default_base_path() -> anyhow::Result<PathBuf> {
        if let Ok(path) = std::env::var("EVENTSEEK_BASE_PATH") {
            return Ok(PathBuf::from(path));
        }

        let home = homedir::my_home()
            .map_err(|err| anyhow::anyhow!("{err:?}"))?
            .ok_or_else(|| anyhow::anyhow!("could not determine home directory"))?;

        Ok(home.join(".local/share/eventseek"))
    }
}
