//! `md2confl convert` command implementation.

use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use md2confl_config::{CliSettings, Config, NewlineSetting, TaskListMode};
use md2confl_renderer::{CodeBlockTheme, convert};

use crate::error::CliError;
use crate::output::Output;

/// Path that selects stdin as input.
const STDIN_PATH: &str = "-";

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (default: stdin).
    input: Option<PathBuf>,

    /// Write wiki markup to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover md2confl.toml).
    #[arg(short, long, env = "MD2CONFL_CONFIG")]
    config: Option<PathBuf>,

    /// Code block theme (overrides config).
    #[arg(long)]
    theme: Option<CodeBlockTheme>,

    /// Show line numbers in code blocks (overrides config).
    #[arg(long)]
    line_numbers: bool,

    /// Hide line numbers in code blocks (overrides config).
    #[arg(long, conflicts_with = "line_numbers")]
    no_line_numbers: bool,

    /// Collapse code blocks (overrides config).
    #[arg(long)]
    collapse: bool,

    /// Expand code blocks (overrides config).
    #[arg(long, conflicts_with = "collapse")]
    no_collapse: bool,

    /// Replace newlines inside paragraphs, with a space or the given text.
    #[arg(
        long,
        value_name = "TEXT",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = " "
    )]
    replace_newlines: Option<String>,

    /// Drop task list checkboxes instead of emitting HTML inputs.
    #[arg(long)]
    omit_checkboxes: bool,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, conversion or writing fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let options = config.render_options();

        let markdown = self.read_input()?;
        tracing::debug!(
            input = %self.input_name(),
            bytes = markdown.len(),
            config = ?config.config_path,
            "Converting markdown"
        );
        let markup = convert(&markdown, &options)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &markup)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.write(&markup)?,
        }

        Ok(())
    }

    /// Build config overrides from flags.
    ///
    /// Flags that are not given leave the config file value untouched.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            theme: self.theme,
            show_line_numbers: flag_override(self.line_numbers, self.no_line_numbers),
            collapse: flag_override(self.collapse, self.no_collapse),
            replace_new_lines: self.replace_newlines.clone().map(NewlineSetting::Text),
            task_list_style: self.omit_checkboxes.then_some(TaskListMode::Omit),
        }
    }

    /// Input file, or `None` for stdin.
    fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| *path != Path::new(STDIN_PATH))
    }

    fn input_name(&self) -> String {
        self.input_path()
            .map_or_else(|| "<stdin>".to_owned(), |path| path.display().to_string())
    }

    fn read_input(&self) -> io::Result<String> {
        match self.input_path() {
            Some(path) => std::fs::read_to_string(path),
            None => io::read_to_string(io::stdin()),
        }
    }
}

/// Resolve an `--x`/`--no-x` flag pair; neither given keeps the config value.
fn flag_override(enable: bool, disable: bool) -> Option<bool> {
    match (enable, disable) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
