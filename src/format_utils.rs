//! Format and output parameter handling shared by the `describe` commands.

use crate::{
    commands::params::{PARAMETER_FORMAT, PARAMETER_OUT, PARAMETER_PRETTY},
    error::CliError,
    format::{Formattable, FormattingError, OutputFormat, OutputFormatOptions},
};
use clap::ArgMatches;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Container for parsed format parameters.
#[derive(Debug, Clone)]
pub struct FormatParams {
    pub format: OutputFormat,
    pub out: Option<PathBuf>,
}

/// What was done with rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The output itself, to be printed
    Text(String),
    /// The output was written to this file
    Written(PathBuf),
}

impl Rendered {
    /// Line printed on stdout for this result.
    pub fn message(&self) -> String {
        match self {
            Rendered::Text(text) => text.clone(),
            Rendered::Written(path) => {
                format!("File successfully written to: {}", path.display())
            }
        }
    }
}

impl FormatParams {
    /// Parse the `--format`, `--pretty` and `--out` arguments.
    pub fn from_args(sub_matches: &ArgMatches) -> Result<FormatParams, FormattingError> {
        let format_str = sub_matches
            .get_one::<String>(PARAMETER_FORMAT)
            .map(String::as_str)
            .unwrap_or("json");
        let options = OutputFormatOptions {
            pretty: sub_matches.get_flag(PARAMETER_PRETTY),
        };

        Ok(FormatParams {
            format: OutputFormat::from_string_with_options(format_str, options)?,
            // not every command that renders output accepts --out
            out: sub_matches
                .try_get_one::<PathBuf>(PARAMETER_OUT)
                .ok()
                .flatten()
                .cloned(),
        })
    }

    /// Formats `value` and either returns the text or writes it to `--out`.
    pub fn render<T: Formattable>(&self, value: &T) -> Result<Rendered, CliError> {
        let text = value.format(&self.format)?;
        match &self.out {
            Some(path) => {
                debug!("Writing {} output to {}", self.format, path.display());
                fs::write(path, text).map_err(CliError::OutputError)?;
                Ok(Rendered::Written(path.clone()))
            }
            None => Ok(Rendered::Text(text)),
        }
    }
}
