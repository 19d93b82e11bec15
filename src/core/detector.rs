//! Object detector capability
//!
//! The model runtime stays outside this crate. Anything that can turn an
//! image into `(class, confidence, bbox)` triples plugs in here.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DeskError, DeskResult};
use crate::types::Detection;

/// Detector backend trait
pub trait Detector {
    /// Backend identifier
    fn name(&self) -> &'static str;

    /// Run detection on one image
    fn detect(&mut self, image: &Path) -> DeskResult<Vec<Detection>>;
}

/// Runs an external program (`<program> [args..] <image>`) that prints a JSON
/// array of detections on stdout
#[derive(Debug, Clone)]
pub struct CommandDetector {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandDetector {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed before the image path
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Detector for CommandDetector {
    fn name(&self) -> &'static str {
        "command"
    }

    fn detect(&mut self, image: &Path) -> DeskResult<Vec<Detection>> {
        log::debug!("running detector {} on {}", self.program.display(), image.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(image)
            .output()
            .map_err(|e| {
                DeskError::Detector(format!("failed to start {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DeskError::Detector(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| DeskError::Detector(format!("unparsable detector output: {}", e)))
    }
}

/// Replays a fixed detection list for every image
#[derive(Debug, Clone, Default)]
pub struct FixedDetector {
    detections: Vec<Detection>,
}

impl FixedDetector {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

impl Detector for FixedDetector {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn detect(&mut self, _image: &Path) -> DeskResult<Vec<Detection>> {
        Ok(self.detections.clone())
    }
}
