use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendCfg,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let mut cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        // API_BASE_URL always wins over the file so deployments can retarget
        // the client without editing config.
        if let Ok(base) = std::env::var("API_BASE_URL") {
            if !base.trim().is_empty() {
                cfg.backend.api_base_url = base;
            }
        }
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Default::default(),
            limits: Default::default(),
            display: Default::default(),
            output: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendCfg {
    pub api_base_url: String,
}
impl Default for BackendCfg {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5001".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Largest image upload accepted client-side, in bytes. 0 disables the
    /// check. Mirrors the service's own request-size cap.
    pub max_image_bytes: u64,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Display {
    /// Tag shown for image-scan results when the backend omits `qr_type`.
    pub qr_type_fallback: String,
    pub color: bool,
}
impl Default for Display {
    fn default() -> Self {
        Self {
            qr_type_fallback: "QRCODE".into(),
            color: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    /// "text" or "json".
    pub format: String,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            format: "text".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
