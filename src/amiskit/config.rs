use crate::error::{AmisError, Result};
use crate::nodes::Page;
use crate::render::{self, RenderOptions};
use directories::ProjectDirs;
use envelope::{DirSource, Shell};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "amis.json";

/// Rendering configuration, stored in `amis.json`.
///
/// ```json
/// {
///   "render": { "locale": "en_US", "theme": "antd" },
///   "template_dir": "templates"
/// }
/// ```
///
/// Every field is optional; missing ones take the [`RenderOptions`] defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmisConfig {
    #[serde(default)]
    pub render: RenderOptions,

    /// Directory of shell templates used instead of the bundled ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

impl AmisConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: AmisConfig = serde_json::from_str(&content).map_err(|err| {
            AmisError::Config(format!("{}: {err}", config_path.display()))
        })?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)
            .map_err(|err| AmisError::Config(err.to_string()))?;
        fs::write(&config_path, content)?;
        tracing::debug!(path = %config_path.display(), "saved config");
        Ok(())
    }

    /// Per-user config directory, if the platform has one.
    pub fn global_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "amiskit").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads the project config if `project_dir` has one, else the per-user
    /// config, else defaults.
    pub fn discover<P: AsRef<Path>>(project_dir: P) -> Result<Self> {
        Self::discover_in(project_dir.as_ref(), Self::global_dir().as_deref())
    }

    fn discover_in(project_dir: &Path, global_dir: Option<&Path>) -> Result<Self> {
        if project_dir.join(CONFIG_FILENAME).exists() {
            return Self::load(project_dir);
        }
        match global_dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::default()),
        }
    }

    /// A shell over `template_dir`, or `None` to use the bundled templates.
    pub fn shell(&self) -> Option<Shell> {
        self.template_dir
            .as_ref()
            .map(|dir| Shell::new(DirSource::new(dir)))
    }

    /// Renders `page` with the configured options and templates.
    ///
    /// Builds a fresh shell per call when `template_dir` is set; hold on to
    /// [`AmisConfig::shell`] and use [`Page::render_with`] to render many pages.
    pub fn render_page(&self, page: &Page) -> Result<String> {
        match self.shell() {
            Some(shell) => render::render_page(page, &shell, &self.render),
            None => render::render_page(page, render::bundled_shell(), &self.render),
        }
    }
}
