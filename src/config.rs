//! Runtime configuration
//!
//! Layers, lowest first: defaults, JSON file named by `DESKWATCH_CONFIG`,
//! `DESKWATCH_*` environment variables, CLI overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{DeskError, DeskResult};
use crate::{
    DEFAULT_API_ADDR, DEFAULT_INPUT_PATH, DEFAULT_LOG_PATH, DEFAULT_MAX_HISTORY,
    DEFAULT_MIN_CONFIDENCE, DEFAULT_SCORE_OUTPUT_PATH,
};

pub const ENV_CONFIG: &str = "DESKWATCH_CONFIG";
pub const ENV_INPUT_PATH: &str = "DESKWATCH_INPUT_PATH";
pub const ENV_LOG_PATH: &str = "DESKWATCH_LOG_PATH";
pub const ENV_MAX_HISTORY: &str = "DESKWATCH_MAX_HISTORY";
pub const ENV_API_ADDR: &str = "DESKWATCH_API_ADDR";
pub const ENV_MIN_CONFIDENCE: &str = "DESKWATCH_MIN_CONFIDENCE";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DeskConfigFile {
    input_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    score_output_path: Option<PathBuf>,
    max_history: Option<usize>,
    api_addr: Option<String>,
    min_confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    /// New snapshot document
    pub input_path: PathBuf,
    /// Persisted log document
    pub log_path: PathBuf,
    /// Detector/score output consumed by the converter
    pub score_output_path: PathBuf,
    pub max_history: usize,
    pub api_addr: String,
    /// Detector hits below this are ignored by the pipeline
    pub min_confidence: f64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self::from_file(DeskConfigFile::default())
    }
}

impl DeskConfig {
    /// Load defaults, config file and environment, then validate
    pub fn load() -> DeskResult<Self> {
        let file_cfg = match std::env::var(ENV_CONFIG).ok() {
            Some(path) if !path.trim().is_empty() => read_config_file(Path::new(&path))?,
            _ => DeskConfigFile::default(),
        };
        let mut cfg = Self::from_file(file_cfg);
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: DeskConfigFile) -> Self {
        Self {
            input_path: file
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
            log_path: file
                .log_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH)),
            score_output_path: file
                .score_output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORE_OUTPUT_PATH)),
            max_history: file.max_history.unwrap_or(DEFAULT_MAX_HISTORY),
            api_addr: file
                .api_addr
                .unwrap_or_else(|| DEFAULT_API_ADDR.to_string()),
            min_confidence: file.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE),
        }
    }

    fn apply_env(&mut self) -> DeskResult<()> {
        if let Ok(path) = std::env::var(ENV_INPUT_PATH) {
            if !path.trim().is_empty() {
                self.input_path = PathBuf::from(path);
            }
        }
        if let Ok(path) = std::env::var(ENV_LOG_PATH) {
            if !path.trim().is_empty() {
                self.log_path = PathBuf::from(path);
            }
        }
        if let Ok(addr) = std::env::var(ENV_API_ADDR) {
            if !addr.trim().is_empty() {
                self.api_addr = addr;
            }
        }
        if let Ok(max) = std::env::var(ENV_MAX_HISTORY) {
            self.max_history = max.trim().parse().map_err(|_| {
                DeskError::Config(format!("{} must be a positive integer", ENV_MAX_HISTORY))
            })?;
        }
        if let Ok(conf) = std::env::var(ENV_MIN_CONFIDENCE) {
            self.min_confidence = conf.trim().parse().map_err(|_| {
                DeskError::Config(format!("{} must be a number", ENV_MIN_CONFIDENCE))
            })?;
        }
        Ok(())
    }

    /// Reject values the reconciler cannot work with
    pub fn validate(&self) -> DeskResult<()> {
        if self.max_history == 0 {
            return Err(DeskError::Config("max_history must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(DeskError::Config(format!(
                "min_confidence must be between 0 and 1, got {}",
                self.min_confidence
            )));
        }
        for (name, path) in [
            ("input_path", &self.input_path),
            ("log_path", &self.log_path),
            ("score_output_path", &self.score_output_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(DeskError::Config(format!("{} must not be empty", name)));
            }
        }
        if self.input_path == self.log_path {
            return Err(DeskError::Config(
                "input_path and log_path must be different files".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> DeskResult<DeskConfigFile> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        DeskError::Config(format!("failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| DeskError::Config(format!("invalid config file {}: {}", path.display(), e)))
}
