use crate::editor::EditSpec;
use crate::errors::Result;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config directory.
const CONFIG_DIR_NAME: &str = "caption-edit";

/// Defaults loaded from a YAML file.
///
/// Every key is optional; values given on the command line take precedence.
///
/// ```yaml
/// prepend: ">> "
/// append: "\n-- edited"
/// recursive: true
/// output: ./edited
/// log_dir: ./logs
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EditConfig {
    /// Text to add at the beginning of each file.
    #[serde(default)]
    pub prepend: Option<String>,
    /// Text to add at the end of each file.
    #[serde(default)]
    pub append: Option<String>,
    /// Whether subdirectories are scanned.
    #[serde(default)]
    pub recursive: Option<bool>,
    /// Directory edited files are mirrored into.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Directory the error log is written to.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

/// Everything a run needs, after merging the command line with the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory searched for text files.
    pub root: PathBuf,
    pub spec: EditSpec,
    pub recursive: bool,
    pub log_dir: PathBuf,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
    pub dry_run: bool,
}

/// A utility for locating and loading the defaults file.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds the configuration file by searching in a prioritized list of locations.
    ///
    /// The search order is:
    /// 1. `config_path` as given (absolute, or relative to the current directory).
    /// 2. A path relative to `working_dir`.
    /// 3. Inside the platform config directory, e.g. `~/.config/caption-edit/`.
    pub fn find_config(config_path: &Path, working_dir: &Path) -> Result<PathBuf> {
        if config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        let mut tried_locations = vec![config_path.display().to_string()];

        if config_path.is_relative() {
            let in_working_dir = working_dir.join(config_path);
            if in_working_dir.exists() {
                return Ok(in_working_dir);
            }
            tried_locations.push(in_working_dir.display().to_string());

            if let Some(config_dir) = dirs::config_dir() {
                let user_config = config_dir.join(CONFIG_DIR_NAME).join(config_path);
                if user_config.exists() {
                    return Ok(user_config);
                }
                tried_locations.push(user_config.display().to_string());
            }
        }

        Err(format!(
            "Config file '{}' not found. Searched in:\n  - {}",
            config_path.display(),
            tried_locations.join("\n  - ")
        )
        .into())
    }

    /// Loads an `EditConfig` from a YAML file.
    pub fn load_edit_config(path: &Path) -> Result<EditConfig> {
        let file = File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
}
