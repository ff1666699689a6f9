//! Configuration loading and management

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::hotkey::HotkeyBinding;
use crate::update;
use crate::visibility::PressPolicy;

/// Binding used when the environment does not name one.
pub const DEFAULT_HOTKEY: &str = "Ctrl+Shift+Space";

/// Shell configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Unix domain socket for the control surface
    pub socket_path: PathBuf,

    /// Directory for runtime data
    pub data_dir: PathBuf,

    /// Binding to register at startup
    pub hotkey: HotkeyBinding,

    /// What a hotkey press does
    pub press_policy: PressPolicy,

    /// Display name of the autostart entry
    pub autostart_name: String,

    /// Endpoint queried for the latest release
    pub release_endpoint: String,
}

impl Config {
    /// Load configuration from environment and defaults.
    pub fn load() -> Result<Self> {
        let home = std::env::var("HOME")?;
        let data_dir = PathBuf::from(&home)
            .join(".local")
            .join("share")
            .join("hotshell");

        let socket_path = data_dir.join("shell.sock");

        let hotkey = match std::env::var("HOTSHELL_HOTKEY") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid HOTSHELL_HOTKEY '{raw}'"))?,
            Err(_) => DEFAULT_HOTKEY.parse().context("default hotkey")?,
        };

        let press_policy = match std::env::var("HOTSHELL_PRESS_POLICY") {
            Ok(raw) => parse_policy(&raw)?,
            Err(_) => PressPolicy::default(),
        };

        let release_endpoint = std::env::var("HOTSHELL_RELEASE_ENDPOINT")
            .unwrap_or_else(|_| update::RELEASE_ENDPOINT.to_string());

        Ok(Self {
            socket_path,
            data_dir,
            hotkey,
            press_policy,
            autostart_name: "hotshell".to_string(),
            release_endpoint,
        })
    }

    /// Ensure data directory exists.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

fn parse_policy(raw: &str) -> Result<PressPolicy> {
    match raw.to_ascii_lowercase().as_str() {
        "toggle" => Ok(PressPolicy::Toggle),
        "notify" => Ok(PressPolicy::Notify),
        other => bail!("invalid HOTSHELL_PRESS_POLICY '{other}'"),
    }
}
