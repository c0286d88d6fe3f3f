//! Configuration persistence
//!
//! Binding tables are stored as two arrays of raw 32-bit codes in
//! [`LogicalButton`](crate::mapping::LogicalButton) order, next to the
//! frontend settings. A missing file is replaced by the defaults so the
//! frontend always starts with a usable keyboard layout.

pub mod config_store;

pub use config_store::{
    parse_config, render_config, ConfigError, ConfigStore, FrontendSettings, PadbindConfig,
};
