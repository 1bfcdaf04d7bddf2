use anyhow::Result;
use config::Config;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::{CoreError, CoreResult};

/// Default wrap width for encoded lines, in columns.
pub const DEFAULT_WRAP_WIDTH: usize = 75;

/// Default line terminator for encoded output.
pub const DEFAULT_NEWLINE: &str = "\r\n";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub decode: DecodeConfig,
    #[serde(default)]
    pub encode: EncodeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// ## Summary
/// Policy consumed by the line decoder.
///
/// When `raise_on_invalid_line` is set, a line that does not match the
/// content-line grammar is an error. Otherwise the decoder hands back a field
/// marked invalid and the caller decides whether to skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DecodeConfig {
    #[serde(default = "default_raise_on_invalid_line")]
    pub raise_on_invalid_line: bool,
}

impl DecodeConfig {
    /// ## Summary
    /// Decoding policy that fails on the first malformed line.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            raise_on_invalid_line: true,
        }
    }

    /// ## Summary
    /// Decoding policy that degrades malformed lines to invalid fields.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            raise_on_invalid_line: false,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::strict()
    }
}

const fn default_raise_on_invalid_line() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EncodeConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_newline")]
    pub newline: String,
}

impl EncodeConfig {
    /// ## Summary
    /// Checks that the wrap width is usable by the folder.
    ///
    /// ## Errors
    /// Returns an error if the width is 1, which leaves no room for content
    /// after the continuation space.
    pub fn validate(&self) -> CoreResult<()> {
        if self.width == 1 {
            return Err(CoreError::InvalidConfiguration(format!(
                "wrap width {} is too narrow",
                self.width
            )));
        }
        if self.newline.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "newline must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WRAP_WIDTH,
            newline: DEFAULT_NEWLINE.to_string(),
        }
    }
}

fn default_width() -> usize {
    DEFAULT_WRAP_WIDTH
}

fn default_newline() -> String {
    DEFAULT_NEWLINE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// ## Summary
    /// Builds the subscriber filter for the configured level, falling back to
    /// `info` when the directive does not parse.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.level.as_str()).unwrap_or_else(|e| {
            tracing::warn!(level = %self.level, error = %e, "Invalid log level in config, using info");
            EnvFilter::new("info")
        })
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables (`DIRINFO__SECTION__KEY`)
    /// and an optional `dirinfo.toml` into `Settings`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the encode section fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("decode.raise_on_invalid_line", true)?
            .set_default("encode.width", DEFAULT_WRAP_WIDTH as u64)?
            .set_default("encode.newline", DEFAULT_NEWLINE)?
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name("dirinfo.toml").required(false))
            // Env vars override the file
            .add_source(
                config::Environment::with_prefix("DIRINFO")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.encode.validate()?;
        tracing::debug!(?settings, "Configuration loaded");

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
