//! TOML persistence for bindings and frontend settings
//!
//! ```toml
//! keyboard = [120, 122, ...]   # 15 codes in LogicalButton order
//! joypad = [4294967295, ...]
//!
//! [frontend]
//! auto_pause = true
//! layout = "vertical"
//! ```

use crate::frontend::touch::ScreenLayout;
use crate::mapping::{default_keyboard_codes, BindingTable, Bindings, PhysicalCode, NB_KEYS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub const CONFIG_DIR: &str = ".config/padbind";
pub const CONFIG_FILE: &str = "bindings.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Options of the host frontend that influence input processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendSettings {
    /// Pause emulation while the window is unfocused.
    pub auto_pause: bool,
    pub allow_simultaneous_opposites: bool,
    pub layout: ScreenLayout,
    /// Window pixels per emulated screen pixel.
    pub screen_size_ratio: f32,
    /// Enables the `m` hotkey that toggles microphone noise.
    pub fake_mic_hotkey: bool,
    /// Skip joystick initialization entirely.
    pub no_joystick: bool,
    pub capture_timeout_ms: u64,
    pub tick_rate_hz: u32,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            auto_pause: false,
            allow_simultaneous_opposites: false,
            layout: ScreenLayout::Vertical,
            screen_size_ratio: 1.0,
            fake_mic_hotkey: false,
            no_joystick: false,
            capture_timeout_ms: 10_000,
            tick_rate_hz: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadbindConfig {
    pub keyboard: Vec<u32>,
    pub joypad: Vec<u32>,
    pub frontend: FrontendSettings,
}

impl Default for PadbindConfig {
    fn default() -> Self {
        Self::from_bindings(&Bindings::with_defaults(), FrontendSettings::default())
    }
}

impl PadbindConfig {
    pub fn from_bindings(bindings: &Bindings, frontend: FrontendSettings) -> Self {
        Self {
            keyboard: bindings.keyboard.codes().iter().map(|c| c.raw()).collect(),
            joypad: bindings.joypad.codes().iter().map(|c| c.raw()).collect(),
            frontend,
        }
    }

    /// Builds the binding tables. Joypad entries holding the 16-bit unbound
    /// marker of older files are read as unbound.
    pub fn bindings(&self) -> Result<Bindings, ConfigError> {
        let keyboard = codes_from(
            &self.keyboard,
            "keyboard",
            PhysicalCode::from_raw,
            default_keyboard_codes(),
        )?;
        let joypad = codes_from(
            &self.joypad,
            "joypad",
            PhysicalCode::from_stored_joy,
            [PhysicalCode::UNBOUND; NB_KEYS],
        )?;
        Ok(Bindings {
            keyboard: BindingTable::from_codes(keyboard),
            joypad: BindingTable::from_codes(joypad),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bindings()?;

        let ratio = self.frontend.screen_size_ratio;
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "screen_size_ratio must be positive, got {}",
                ratio
            )));
        }
        if self.frontend.tick_rate_hz == 0 {
            return Err(ConfigError::Invalid("tick_rate_hz must not be 0".to_string()));
        }
        if self.frontend.capture_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "capture_timeout_ms must not be 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn codes_from(
    raw: &[u32],
    table: &str,
    convert: fn(u32) -> PhysicalCode,
    fallback: [PhysicalCode; NB_KEYS],
) -> Result<[PhysicalCode; NB_KEYS], ConfigError> {
    if raw.is_empty() {
        return Ok(fallback);
    }
    if raw.len() != NB_KEYS {
        return Err(ConfigError::Invalid(format!(
            "{} table has {} entries, expected {}",
            table,
            raw.len(),
            NB_KEYS
        )));
    }

    let mut codes = [PhysicalCode::UNBOUND; NB_KEYS];
    for (code, &value) in codes.iter_mut().zip(raw) {
        *code = convert(value);
    }
    Ok(codes)
}

pub fn parse_config(content: &str) -> Result<PadbindConfig, ConfigError> {
    let config: PadbindConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

pub fn render_config(config: &PadbindConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Location of the bindings file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/padbind/bindings.toml`
    pub fn default_location() -> Self {
        let mut path = get_home_dir();
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<PadbindConfig, ConfigError> {
        debug!("Loading config from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigError::Read {
                path: self.path.clone(),
                source,
            })?;
        parse_config(&content).inspect_err(|e| error!("{}", e))
    }

    /// Loads the file, writing the defaults out first when it does not exist.
    pub async fn load_or_create(&self) -> Result<PadbindConfig, ConfigError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| ConfigError::Read {
                path: self.path.clone(),
                source,
            })?;

        if exists {
            return self.load().await;
        }

        info!("No config at {}, writing defaults", self.path.display());
        let config = PadbindConfig::default();
        self.save(&config).await?;
        Ok(config)
    }

    pub async fn save(&self, config: &PadbindConfig) -> Result<(), ConfigError> {
        let content = render_config(config)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;
        info!("Saved config to {}", self.path.display());
        Ok(())
    }
}

fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        warn!("Could not determine home directory, using current directory");
        PathBuf::from(".")
    })
}
