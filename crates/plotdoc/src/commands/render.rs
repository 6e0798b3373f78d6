//! `plotdoc render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use plotdoc_config::{CliSettings, Config, PlotlyConfig};
use plotdoc_renderer::{DocumentRenderer, RenderOptions, RenderResult};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    input: PathBuf,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover plotdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// plotly.js bundle URL (overrides config).
    #[arg(long)]
    script_url: Option<String>,

    /// Don't append the plotly.js bundle and loader.
    #[arg(long)]
    no_script: bool,

    /// Print `{html, nodes, warnings}` as JSON instead of HTML.
    #[arg(long)]
    json: bool,

    /// Treat directive warnings as errors.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, the input can't be read,
    /// the output can't be written, or `--strict` is set and warnings occurred.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.load_config()?;
        let result = self.render(&config)?;

        for warning in &result.warnings {
            output.warning(&format!("{}: {warning}", self.input.display()));
        }
        self.check_warnings(&result)?;

        let plot_count = result.plot_count();
        let warning_count = result.warnings.len();
        let rendered = self.format(result)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered).map_err(|source| CliError::Write {
                    path: path.clone(),
                    source,
                })?;
                output.success(&format!(
                    "Rendered {} ({plot_count} plot(s)) to {}",
                    self.input.display(),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }

        tracing::info!(
            input = %self.input.display(),
            plots = plot_count,
            warnings = warning_count,
            "Render finished"
        );
        Ok(())
    }

    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            script_url: self.script_url.clone(),
            include_script: self.no_script.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using configuration");
        }
        Ok(config)
    }

    /// Read the input file and render it with `config`.
    fn render(&self, config: &Config) -> Result<RenderResult, CliError> {
        let markdown = std::fs::read_to_string(&self.input).map_err(|source| CliError::Read {
            path: self.input.clone(),
            source,
        })?;

        Ok(DocumentRenderer::new(render_options(&config.plotly))
            .with_source_path(&self.input)
            .render(&markdown))
    }

    /// Fail under `--strict` when the render produced warnings.
    fn check_warnings(&self, result: &RenderResult) -> Result<(), CliError> {
        if self.strict && !result.warnings.is_empty() {
            return Err(CliError::Validation(format!(
                "{} directive warning(s) in {}",
                result.warnings.len(),
                self.input.display()
            )));
        }
        Ok(())
    }

    /// HTML, or `{html, nodes, warnings}` JSON under `--json`.
    fn format(&self, result: RenderResult) -> Result<String, CliError> {
        if self.json {
            Ok(serde_json::to_string_pretty(&result)?)
        } else {
            Ok(result.html)
        }
    }
}

/// Map the `[plotly]` config section onto renderer options.
fn render_options(plotly: &PlotlyConfig) -> RenderOptions {
    RenderOptions {
        plot_width: plotly.width.clone(),
        responsive: plotly.responsive,
        script_url: plotly.script_url.clone(),
        include_script: plotly.include_script,
    }
}
