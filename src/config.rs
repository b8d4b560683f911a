//! Configuration file structures for the bot.
//!
//! The configuration is read from a YAML file, then overridden by environment
//! variables prefixed with `PUBGBOT_`, nested keys being separated by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! pubg:
//!   url: "https://api.pubg.com"     # optional
//!   api_key: "your-api-key"
//!   default_region: "pc_na"         # optional
//!   default_mode: "solo_fpp"        # optional
//!
//! matrix:
//!   user_id: "@pubg:matrix.org"
//!   password: "secret-password"
//!
//! analytics:                        # optional
//!   mixpanel_token: "token"
//!
//! fonts:
//!   regular: "assets/Teko-Regular.ttf"
//!   bold: "assets/Teko-Bold.ttf"
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export PUBGBOT_PUBG__API_KEY="key-from-env"
//! export PUBGBOT_MATRIX__PASSWORD="secret-from-env"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// PUBG API settings
    pub pubg: Pubg,
    /// Matrix account configuration
    pub matrix: Matrix,
    #[serde(default)]
    pub analytics: Analytics,
    /// Faces the comparison images are printed with
    pub fonts: Fonts,
}

#[derive(Debug, Deserialize)]
pub struct Pubg {
    /// Base URL of the API, without trailing slash
    #[serde(default = "default_url")]
    pub url: String,
    pub api_key: String,
    /// Region used when neither the command nor the room sets one
    #[serde(default = "default_region")]
    pub default_region: String,
    /// Mode used when neither the command nor the room sets one
    #[serde(default = "default_mode")]
    pub default_mode: String,
}

/// Matrix account configuration.
#[derive(Debug, Deserialize)]
pub struct Matrix {
    /// Fully qualified Matrix user ID, e.g. `@pubg:matrix.org`.
    pub user_id: String,

    /// Matrix account password.
    ///
    /// Used for the first login only. The session is then persisted in the
    /// data directory and restored on restart.
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Analytics {
    /// Events are only logged without a token
    pub mixpanel_token: Option<String>,
}

/// Paths to TrueType or OpenType fonts.
#[derive(Debug, Deserialize)]
pub struct Fonts {
    pub regular: String,
    pub bold: String,
}

fn default_url() -> String {
    "https://api.pubg.com".to_owned()
}

fn default_region() -> String {
    "pc_na".to_owned()
}

fn default_mode() -> String {
    "solo_fpp".to_owned()
}

impl Config {
    /// Loads the YAML file at `path`, overridden by `PUBGBOT_` variables.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Yaml::file(path))
                .merge(Env::prefixed("PUBGBOT_").split("__")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Config, figment::Error> {
        let mut config: Config = figment.extract()?;

        while config.pubg.url.ends_with('/') {
            config.pubg.url.pop();
        }

        Ok(config)
    }
}
