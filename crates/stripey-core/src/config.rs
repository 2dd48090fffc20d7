//! Label configuration and command-line resolution.
//!
//! A run is configured by a JSON payload passed with `--config`:
//!
//! ```text
//! {"labelWidthMm": 50, "labelHeightMm": 30, "dpmm": 8, "rotation": 90}
//! ```
//!
//! Decoding is lenient: missing fields default to zero and unknown fields
//! are ignored.

use std::path::PathBuf;

use serde::de::{self, Unexpected};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::Rotation;

/// Usage text shown for `--help` and when the config is missing.
pub const USAGE: &str = "\
stripey_horse: a knock-off zebra renderer
https://github.com/trueleafmarket-dg/stripey_horse

Reads ZPL from stdin and writes a PNG of the first label.

Usage: stripey_horse --config <JSON> [--output <PATH>]

Options:
  -c, --config <JSON>   JSON configuration for label dimensions, e.g.
                        {\"labelWidthMm\":50,\"labelHeightMm\":30,\"dpmm\":8,\"rotation\":0}
  -o, --output <PATH>   Output file path (defaults to stdout)
  -h, --help            Show this help
  -V, --version         Show version
";

/// Errors from resolving the command line.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `--config` payload was given.
    #[error("config is required")]
    Missing,

    /// The payload is not a JSON object of the expected shape.
    #[error("parsing config JSON: {0}")]
    Invalid(#[from] serde_json::Error),

    /// Unknown flag or a flag without its value.
    #[error("{0}")]
    InvalidArguments(String),
}

/// Physical label parameters for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelConfig {
    /// Label width in millimetres.
    pub label_width_mm: f64,
    /// Label height in millimetres.
    pub label_height_mm: f64,
    /// Print density in dots per millimetre (8 = 203 dpi).
    pub dpmm: i32,
    /// Rotation applied to the final image: 0, 90, 180 or 270.
    pub rotation: i32,
    /// TrueType/OpenType font for text fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl LabelConfig {
    /// Decode a JSON payload, which must be an object.
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        if !value.is_object() {
            return Err(ConfigError::Invalid(de::Error::invalid_type(
                unexpected(&value),
                &"a JSON object",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The configured rotation; unsupported angles mean no rotation.
    pub fn rotation(&self) -> Rotation {
        Rotation::from_degrees(self.rotation)
    }
}

fn unexpected(value: &serde_json::Value) -> Unexpected<'_> {
    match value {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Number(_) => Unexpected::Other("number"),
        serde_json::Value::String(s) => Unexpected::Str(s.as_str()),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
    }
}

/// Everything a render run needs from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config: LabelConfig,
    /// `None` writes to standard output.
    pub output: Option<PathBuf>,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Render(Invocation),
    Help,
    Version,
}

/// Resolve process arguments (without the program name).
///
/// Accepts `--config VALUE`, `--config=VALUE`, `-c VALUE` and `-cVALUE`,
/// and the same forms for `--output`/`-o`. The last occurrence of a flag wins.
pub fn resolve<I, S>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut config_json: Option<String> = None;
    let mut output: Option<String> = None;

    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        let (flag, inline) = split_flag(&arg);
        let slot = match flag {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--config" | "-c" => &mut config_json,
            "--output" | "-o" => &mut output,
            _ => {
                return Err(ConfigError::InvalidArguments(format!(
                    "unknown argument '{arg}'"
                )))
            }
        };
        let value = match inline {
            Some(value) => value.to_string(),
            None => args.next().ok_or_else(|| {
                ConfigError::InvalidArguments(format!("{flag} requires a value"))
            })?,
        };
        *slot = Some(value);
    }

    let payload = config_json
        .filter(|json| !json.trim().is_empty())
        .ok_or(ConfigError::Missing)?;
    let config = LabelConfig::from_json(&payload)?;

    Ok(Command::Render(Invocation {
        config,
        output: output.filter(|path| !path.is_empty()).map(PathBuf::from),
    }))
}

/// Split `--flag=value` and `-fvalue` into flag and inline value.
fn split_flag(arg: &str) -> (&str, Option<&str>) {
    if let Some(long) = arg.strip_prefix("--") {
        return match long.split_once('=') {
            Some((name, value)) => (&arg[..name.len() + 2], Some(value)),
            None => (arg, None),
        };
    }
    if arg.starts_with('-') && arg.len() > 2 && arg.is_char_boundary(2) {
        return (&arg[..2], Some(&arg[2..]));
    }
    (arg, None)
}
