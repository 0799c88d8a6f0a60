//! Settings file handling.
//!
//! Settings come from an optional YAML file; every field has a default and
//! command-line flags override whatever the file says.

use crate::article::DEFAULT_AUTHOR;
use crate::compose::{ComposeOptions, ImagePosition};
use crate::render::{Flavor, RenderOptions};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_author: String,
    pub out_dir: PathBuf,
    pub flavor: Flavor,
    pub image_position: ImagePosition,
    /// Relative paths are resolved against `out_dir`.
    pub index_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_author: DEFAULT_AUTHOR.to_string(),
            out_dir: PathBuf::from("out"),
            flavor: Flavor::default(),
            image_position: ImagePosition::default(),
            index_file: PathBuf::from("articles-index.json"),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read settings {}: {e}", path.display()))?;
        Self::from_yaml(&text)
            .map_err(|e| format!("invalid settings {}: {e}", path.display()).into())
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes as null; treat it as "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn index_path(&self) -> PathBuf {
        if self.index_file.is_absolute() {
            self.index_file.clone()
        } else {
            self.out_dir.join(&self.index_file)
        }
    }

    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            render: RenderOptions {
                flavor: self.flavor,
            },
            image_position: self.image_position,
        }
    }
}
