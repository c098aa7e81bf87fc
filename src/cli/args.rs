//! Command-line argument parsing for the bidscope CLI.

use thiserror::Error;

use crate::error::ValidationError;
use crate::models::Source;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run a search (default)
    Search(SearchArgs),
}

/// Arguments of a search invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchArgs {
    /// Positional words joined with single spaces
    pub free_text: String,
    /// Selected portals; empty means every portal
    pub sources: Vec<Source>,
    /// `--url` override of the service base URL
    pub base_url: Option<String>,
}

impl SearchArgs {
    /// Selected sources, falling back to all of them.
    pub fn effective_sources(&self) -> Vec<Source> {
        if self.sources.is_empty() {
            Source::ALL.to_vec()
        } else {
            self.sources.clone()
        }
    }
}

/// Errors from malformed command lines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownFlag(String),

    #[error(transparent)]
    InvalidSource(#[from] ValidationError),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use bidscope::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["bidscope".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut search = SearchArgs::default();
    let mut words: Vec<String> = Vec::new();
    let mut only_words = false;
    let mut args = args.skip(1); // Skip the program name

    while let Some(arg) = args.next() {
        if only_words {
            words.push(arg);
            continue;
        }

        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--" => only_words = true,
            "--source" | "-s" => {
                let value = args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                push_sources(&mut search.sources, &value)?;
            }
            "--url" => {
                let value = args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                search.base_url = Some(value);
            }
            other => {
                if let Some(value) = other.strip_prefix("--source=") {
                    push_sources(&mut search.sources, value)?;
                } else if let Some(value) = other.strip_prefix("--url=") {
                    search.base_url = Some(value.to_string());
                } else if other.starts_with('-') && other.len() > 1 {
                    return Err(ArgsError::UnknownFlag(other.to_string()));
                } else {
                    words.push(other.to_string());
                }
            }
        }
    }

    if words.is_empty() && search.sources.is_empty() && search.base_url.is_none() {
        return Ok(CliCommand::Help);
    }

    search.free_text = words.join(" ");
    Ok(CliCommand::Search(search))
}

fn push_sources(sources: &mut Vec<Source>, list: &str) -> Result<(), ValidationError> {
    for item in list.split(',').filter(|s| !s.trim().is_empty()) {
        let source: Source = item.parse()?;
        if !sources.contains(&source) {
            sources.push(source);
        }
    }
    Ok(())
}
