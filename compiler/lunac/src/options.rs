//! Flags shared by every command.
//!
//! Flags take their value after `=` (`--edition=2026`) and may appear
//! before or after the paths. Everything not starting with `-` is a path;
//! a lone `-` means stdin.

use luna_diagnostic::emitter::ColorMode;
use luna_parse::{
    Edition, FeatureFlags, LongBracketMode, ParseConfig, UnknownEdition, FEATURE_NAMES,
};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    /// One JSON object per diagnostic.
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub config: ParseConfig,
    pub format: OutputFormat,
    pub color: ColorMode,
    /// `fmt` only: report unformatted files instead of printing them.
    pub check: bool,
    pub paths: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error(transparent)]
    Edition(#[from] UnknownEdition),
    #[error("unknown feature `{name}` (known: all, {known})")]
    UnknownFeature { name: String, known: String },
    #[error("unknown long-bracket mode `{0}` (expected `long` or `index`)")]
    UnknownLongBracketMode(String),
    #[error("unknown colour mode `{0}` (expected `auto`, `always` or `never`)")]
    UnknownColorMode(String),
    #[error("`{0}` needs a value, as in `{0}=...`")]
    MissingValue(String),
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
}

/// Parse the arguments that follow the command name.
pub fn parse_options(args: &[String]) -> Result<Options, OptionsError> {
    let mut edition = Edition::default();
    let mut features = FeatureFlags::STABLE;
    let mut long_brackets = None;
    let mut declarations = false;
    let mut format = OutputFormat::Human;
    let mut color = ColorMode::Auto;
    let mut check = false;
    let mut paths = Vec::new();

    for arg in args {
        if arg == "-" || !arg.starts_with('-') {
            paths.push(arg.clone());
            continue;
        }
        let (flag, value) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (arg.as_str(), None),
        };
        let required = || value.ok_or_else(|| OptionsError::MissingValue(flag.to_owned()));
        match flag {
            "--edition" => edition = required()?.parse()?,
            "--feature" => {
                for name in required()?.split(',') {
                    features |= feature(name)?;
                }
            }
            "--long-brackets" => long_brackets = Some(long_bracket_mode(required()?)?),
            "--declarations" => declarations = true,
            "--json" => format = OutputFormat::Json,
            "--color" => color = color_mode(required()?)?,
            "--check" => check = true,
            _ => return Err(OptionsError::UnknownFlag(arg.clone())),
        }
    }

    let mut config = ParseConfig::for_edition(edition).with_features(features);
    if let Some(mode) = long_brackets {
        config = config.with_long_bracket_mode(mode);
    }
    if declarations {
        config = config.declarations();
    }
    Ok(Options {
        config,
        format,
        color,
        check,
        paths,
    })
}

fn feature(name: &str) -> Result<FeatureFlags, OptionsError> {
    if name == "all" {
        return Ok(FeatureFlags::all());
    }
    FeatureFlags::from_cli_name(name).ok_or_else(|| OptionsError::UnknownFeature {
        name: name.to_owned(),
        known: FEATURE_NAMES
            .iter()
            .map(|(n, _)| *n)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn long_bracket_mode(value: &str) -> Result<LongBracketMode, OptionsError> {
    match value {
        "long" => Ok(LongBracketMode::LongBracketWins),
        "index" => Ok(LongBracketMode::IndexBracketWins),
        _ => Err(OptionsError::UnknownLongBracketMode(value.to_owned())),
    }
}

fn color_mode(value: &str) -> Result<ColorMode, OptionsError> {
    match value {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err(OptionsError::UnknownColorMode(value.to_owned())),
    }
}

#[cfg(test)]
mod tests;
