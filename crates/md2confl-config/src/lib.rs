//! Configuration management for md2confl.
//!
//! Parses `md2confl.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`]. The loaded
//! [`Config`] turns into renderer options with [`Config::render_options`].
//!
//! ```toml
//! [code_block]
//! theme = "Midnight"
//! show_line_numbers = true
//! collapse = false
//!
//! [paragraph]
//! replace_new_lines = " "
//!
//! [task_list]
//! style = "omit"
//! ```

use std::path::{Path, PathBuf};

use md2confl_renderer::{CodeBlockTheme, NewlineReplacement, RenderOptions, TaskListStyle};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override code block theme.
    pub theme: Option<CodeBlockTheme>,
    /// Override line numbers flag.
    pub show_line_numbers: Option<bool>,
    /// Override collapse flag.
    pub collapse: Option<bool>,
    /// Override paragraph newline replacement.
    pub replace_new_lines: Option<NewlineSetting>,
    /// Override task list rendering.
    pub task_list_style: Option<TaskListMode>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "md2confl.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Code block macro configuration.
    pub code_block: CodeBlockConfig,
    /// Paragraph configuration.
    pub paragraph: ParagraphConfig,
    /// Task list configuration.
    pub task_list: TaskListConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Code block macro configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CodeBlockConfig {
    /// Theme name. Unknown names fall back to `Confluence`.
    pub theme: Option<String>,
    /// Whether code blocks show line numbers.
    pub show_line_numbers: bool,
    /// Whether code blocks start collapsed.
    pub collapse: bool,
}

impl CodeBlockConfig {
    /// Resolved code block theme.
    #[must_use]
    pub fn theme(&self) -> CodeBlockTheme {
        let Some(name) = self.theme.as_deref() else {
            return CodeBlockTheme::default();
        };
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(
                theme = name,
                fallback = %CodeBlockTheme::default(),
                "Unknown code block theme, using fallback"
            );
            CodeBlockTheme::default()
        })
    }
}

/// Paragraph configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParagraphConfig {
    /// Newline replacement inside paragraphs.
    pub replace_new_lines: NewlineSetting,
}

/// Newline replacement as written in TOML: a flag or the replacement text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NewlineSetting {
    /// `true` replaces newlines with a space, `false` keeps them.
    Enabled(bool),
    /// Replace newlines with this text.
    Text(String),
}

impl Default for NewlineSetting {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl From<&NewlineSetting> for NewlineReplacement {
    fn from(setting: &NewlineSetting) -> Self {
        match setting {
            NewlineSetting::Enabled(enabled) => Self::from(*enabled),
            NewlineSetting::Text(text) => Self::Text(text.clone()),
        }
    }
}

/// Task list configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskListConfig {
    /// How task list markers are rendered.
    pub style: TaskListMode,
}

/// Task list rendering as written in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskListMode {
    /// Disabled HTML checkbox before the item text.
    #[default]
    Checkbox,
    /// Item text only.
    Omit,
}

impl From<TaskListMode> for TaskListStyle {
    fn from(mode: TaskListMode) -> Self {
        match mode {
            TaskListMode::Checkbox => Self::HtmlCheckbox,
            TaskListMode::Omit => Self::Omit,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `md2confl.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No configuration file found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(theme) = settings.theme {
            self.code_block.theme = Some(theme.to_string());
        }
        if let Some(show_line_numbers) = settings.show_line_numbers {
            self.code_block.show_line_numbers = show_line_numbers;
        }
        if let Some(collapse) = settings.collapse {
            self.code_block.collapse = collapse;
        }
        if let Some(replace_new_lines) = &settings.replace_new_lines {
            self.paragraph.replace_new_lines.clone_from(replace_new_lines);
        }
        if let Some(style) = settings.task_list_style {
            self.task_list.style = style;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let NewlineSetting::Text(text) = &self.paragraph.replace_new_lines
            && text.is_empty()
        {
            return Err(ConfigError::Validation(
                "paragraph.replace_new_lines cannot be an empty string".to_owned(),
            ));
        }
        Ok(())
    }

    /// Renderer options for this configuration.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_theme(self.code_block.theme())
            .with_line_numbers(self.code_block.show_line_numbers)
            .with_collapse(self.code_block.collapse)
            .with_newline_replacement(&self.paragraph.replace_new_lines)
            .with_task_list_style(self.task_list.style.into())
    }
}
